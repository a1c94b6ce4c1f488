//! Error types.
//!
//! Every fallible operation in the crate returns [`Result`]. Mutating
//! calls on [`Assignment`](crate::models::Assignment) and
//! [`Schedule`](crate::models::Schedule) validate all of their inputs
//! before touching state, so an `Err` always leaves the object unchanged.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by model construction, decision mutation and I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// A field is outside its allowed range.
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// Two entities of the same kind share an identifier.
    #[error("duplicate {kind} {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    /// A required collection is empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("guest {0} is not part of this instance")]
    UnknownGuest(u32),

    #[error("room {0} is not part of this instance")]
    UnknownRoom(u32),

    #[error("housekeeper {0} is not part of this schedule")]
    UnknownHousekeeper(u32),

    /// The room already holds a guest.
    #[error("room {room} is already occupied by guest {guest}")]
    RoomOccupied { room: u32, guest: u32 },

    /// The guest already holds a room.
    #[error("guest {guest} is already assigned to room {room}")]
    GuestAssigned { guest: u32, room: u32 },

    /// The room type is lower than the requested type.
    #[error("room {room} (type {room_type}) cannot serve guest {guest} (type {guest_type})")]
    Downgrade {
        guest: u32,
        guest_type: u32,
        room: u32,
        room_type: u32,
    },

    #[error("room {0} is already scheduled")]
    RoomScheduled(u32),

    /// Cleaning may only start strictly after the room is released.
    #[error("room {room} cannot start at {start}: released at {release}")]
    StartBeforeRelease { room: u32, start: i64, release: i64 },

    /// The cleaning interval collides with another room of the same housekeeper.
    #[error("room {room} overlaps room {other} for housekeeper {housekeeper}")]
    Overlap {
        housekeeper: u32,
        room: u32,
        other: u32,
    },

    /// Assignment and schedule were built for different instances.
    #[error("assignment and schedule belong to different instances")]
    InstanceMismatch,

    /// No assignment can serve every guest request.
    #[error("instance is infeasible: room supply cannot cover the requested types")]
    Infeasible,

    /// Batch validation found one or more problems.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV field could not be parsed.
    #[error("line {line}: cannot parse {field} from '{value}'")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
