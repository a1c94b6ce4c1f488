//! Guest model.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A guest requesting a room of at least `guest_type`, wanted at `arrival`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GuestFields")]
pub struct Guest {
    id: u32,
    guest_type: u32,
    arrival: i64,
}

impl Guest {
    /// Creates a guest.
    ///
    /// # Errors
    /// `id` and `guest_type` must be at least 1, `arrival` non-negative.
    pub fn new(id: u32, guest_type: u32, arrival: i64) -> Result<Self> {
        if id < 1 {
            return Err(Error::invalid("guest id", "must be at least 1"));
        }
        if guest_type < 1 {
            return Err(Error::invalid(
                "guest type",
                format!("guest {id}: must be at least 1"),
            ));
        }
        if arrival < 0 {
            return Err(Error::invalid(
                "arrival",
                format!("guest {id}: {arrival} is negative"),
            ));
        }
        Ok(Self {
            id,
            guest_type,
            arrival,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Requested room type.
    #[inline]
    pub fn guest_type(&self) -> u32 {
        self.guest_type
    }

    #[inline]
    pub fn arrival(&self) -> i64 {
        self.arrival
    }
}

#[derive(Deserialize)]
struct GuestFields {
    id: u32,
    guest_type: u32,
    arrival: i64,
}

impl TryFrom<GuestFields> for Guest {
    type Error = Error;

    fn try_from(f: GuestFields) -> Result<Self> {
        Guest::new(f.id, f.guest_type, f.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_new() {
        let g = Guest::new(7, 2, 30).unwrap();
        assert_eq!(g.id(), 7);
        assert_eq!(g.guest_type(), 2);
        assert_eq!(g.arrival(), 30);
    }

    #[test]
    fn test_guest_bounds() {
        assert!(Guest::new(0, 1, 0).is_err());
        assert!(Guest::new(1, 0, 0).is_err());
        assert!(Guest::new(1, 1, -5).is_err());
    }
}
