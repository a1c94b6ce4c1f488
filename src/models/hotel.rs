//! Hotel model: the room inventory and the housekeeping crew size.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::Room;
use crate::error::{Error, Result};

/// An immutable hotel.
///
/// Rooms are stored in ascending room-number order regardless of the
/// order in which they were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HotelFields")]
pub struct Hotel {
    crew_size: u32,
    rooms: Vec<Room>,
    #[serde(skip)]
    index: HashMap<u32, usize>,
    #[serde(skip)]
    type_frequency: BTreeMap<u32, usize>,
}

impl Hotel {
    /// Starts building a hotel with `crew_size` housekeepers.
    pub fn builder(crew_size: u32) -> HotelBuilder {
        HotelBuilder::new(crew_size)
    }

    /// Number of housekeepers.
    #[inline]
    pub fn crew_size(&self) -> u32 {
        self.crew_size
    }

    /// All rooms by ascending number.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Looks up a room by number.
    pub fn room(&self, number: u32) -> Option<&Room> {
        self.index.get(&number).map(|&i| &self.rooms[i])
    }

    /// Position of a room in [`Hotel::rooms`].
    pub fn room_index(&self, number: u32) -> Option<usize> {
        self.index.get(&number).copied()
    }

    /// Number of rooms.
    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Room count per type.
    pub fn type_frequency(&self) -> &BTreeMap<u32, usize> {
        &self.type_frequency
    }

    /// Highest room type, `0` for an empty hotel.
    pub fn max_type(&self) -> u32 {
        self.type_frequency.keys().next_back().copied().unwrap_or(0)
    }
}

/// Mutable builder for [`Hotel`].
///
/// Duplicate room numbers are rejected when added; the built hotel owns
/// its own copy of every collection.
#[derive(Debug, Clone)]
pub struct HotelBuilder {
    crew_size: u32,
    rooms: BTreeMap<u32, Room>,
}

impl HotelBuilder {
    /// Creates an empty builder.
    pub fn new(crew_size: u32) -> Self {
        Self {
            crew_size,
            rooms: BTreeMap::new(),
        }
    }

    /// Adds a room.
    ///
    /// # Errors
    /// [`Error::DuplicateId`] if a room with the same number was added.
    pub fn with_room(mut self, room: Room) -> Result<Self> {
        self.add_room(room)?;
        Ok(self)
    }

    /// Adds several rooms, stopping at the first duplicate.
    pub fn with_rooms<I>(mut self, rooms: I) -> Result<Self>
    where
        I: IntoIterator<Item = Room>,
    {
        for room in rooms {
            self.add_room(room)?;
        }
        Ok(self)
    }

    /// Adds a room in place.
    pub fn add_room(&mut self, room: Room) -> Result<&mut Self> {
        if self.rooms.contains_key(&room.number()) {
            return Err(Error::DuplicateId {
                kind: "room",
                id: room.number(),
            });
        }
        self.rooms.insert(room.number(), room);
        Ok(self)
    }

    /// Number of rooms added so far.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Freezes the hotel.
    ///
    /// # Errors
    /// The crew must have at least one housekeeper and the hotel at least
    /// one room.
    pub fn build(&self) -> Result<Hotel> {
        if self.crew_size < 1 {
            return Err(Error::invalid("crew size", "must be at least 1"));
        }
        if self.rooms.is_empty() {
            return Err(Error::Empty("rooms"));
        }

        let rooms: Vec<Room> = self.rooms.values().cloned().collect();
        let index = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.number(), i))
            .collect();
        let mut type_frequency = BTreeMap::new();
        for room in &rooms {
            *type_frequency.entry(room.room_type()).or_insert(0) += 1;
        }

        Ok(Hotel {
            crew_size: self.crew_size,
            rooms,
            index,
            type_frequency,
        })
    }
}

#[derive(Deserialize)]
struct HotelFields {
    crew_size: u32,
    rooms: Vec<Room>,
}

impl TryFrom<HotelFields> for Hotel {
    type Error = Error;

    fn try_from(f: HotelFields) -> Result<Self> {
        HotelBuilder::new(f.crew_size).with_rooms(f.rooms)?.build()
    }
}
