//! Problem instance: a hotel, the day's guests and the guest-room
//! satisfaction weights.
//!
//! An instance is a complete weighted bipartite graph between guests and
//! rooms plus the crew size. Weights that were never set are `0.0`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{Guest, Hotel, Room};
use crate::error::{Error, Result};
use crate::feasibility;

/// An immutable problem instance.
///
/// Guests are stored in ascending id order; that order is the "input
/// order" seen by every heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstanceFields")]
pub struct Instance {
    hotel: Hotel,
    guests: Vec<Guest>,
    /// `weights[guest_index][room_index]`.
    weights: Vec<Vec<f64>>,
    #[serde(skip)]
    guest_index: HashMap<u32, usize>,
    #[serde(skip)]
    request_frequency: BTreeMap<u32, usize>,
}

impl Instance {
    /// Starts building an instance on top of `hotel`.
    pub fn builder(hotel: Hotel) -> InstanceBuilder {
        InstanceBuilder::new(hotel)
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    /// All rooms by ascending number.
    pub fn rooms(&self) -> &[Room] {
        self.hotel.rooms()
    }

    /// All guests by ascending id.
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn room(&self, number: u32) -> Option<&Room> {
        self.hotel.room(number)
    }

    pub fn guest(&self, id: u32) -> Option<&Guest> {
        self.guest_index.get(&id).map(|&i| &self.guests[i])
    }

    /// Position of a room in [`Instance::rooms`].
    pub fn room_index(&self, number: u32) -> Option<usize> {
        self.hotel.room_index(number)
    }

    /// Position of a guest in [`Instance::guests`].
    pub fn guest_index(&self, id: u32) -> Option<usize> {
        self.guest_index.get(&id).copied()
    }

    /// Satisfaction of guest `guest` in room `room`; `0.0` for unknown pairs.
    pub fn weight(&self, guest: u32, room: u32) -> f64 {
        match (self.guest_index(guest), self.room_index(room)) {
            (Some(g), Some(r)) => self.weights[g][r],
            _ => 0.0,
        }
    }

    /// Satisfaction by positions.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn weight_at(&self, guest_index: usize, room_index: usize) -> f64 {
        self.weights[guest_index][room_index]
    }

    #[inline]
    pub fn crew_size(&self) -> u32 {
        self.hotel.crew_size()
    }

    /// Room count per type.
    pub fn type_frequency(&self) -> &BTreeMap<u32, usize> {
        self.hotel.type_frequency()
    }

    /// Guest count per requested type.
    pub fn request_frequency(&self) -> &BTreeMap<u32, usize> {
        &self.request_frequency
    }

    /// Highest type appearing among rooms or requests.
    pub fn max_type(&self) -> u32 {
        let max_request = self
            .request_frequency
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0);
        self.hotel.max_type().max(max_request)
    }

    /// Whether every guest can be given a room of at least the requested type.
    pub fn is_feasible(&self) -> bool {
        feasibility::is_feasible(self.type_frequency(), &self.request_frequency)
    }

    /// Largest type an additional guest could request and still be served.
    ///
    /// Returns `-1` if the instance is already infeasible and `0` if no
    /// additional guest fits at all.
    pub fn max_feasible_type_request(&self) -> i64 {
        feasibility::max_feasible_type_request(self.type_frequency(), &self.request_frequency)
    }
}

/// Mutable builder for [`Instance`].
///
/// Guests must be added before their weights. The built instance copies
/// everything, so the builder may keep being used afterwards.
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    hotel: Hotel,
    guests: BTreeMap<u32, Guest>,
    weights: HashMap<(u32, u32), f64>,
}

impl InstanceBuilder {
    pub fn new(hotel: Hotel) -> Self {
        Self {
            hotel,
            guests: BTreeMap::new(),
            weights: HashMap::new(),
        }
    }

    /// Adds a guest.
    ///
    /// # Errors
    /// [`Error::DuplicateId`] if a guest with the same id was added.
    pub fn with_guest(mut self, guest: Guest) -> Result<Self> {
        self.add_guest(guest)?;
        Ok(self)
    }

    /// Adds several guests, stopping at the first duplicate.
    pub fn with_guests<I>(mut self, guests: I) -> Result<Self>
    where
        I: IntoIterator<Item = Guest>,
    {
        for guest in guests {
            self.add_guest(guest)?;
        }
        Ok(self)
    }

    /// Sets the satisfaction of `guest` in `room`.
    ///
    /// # Errors
    /// The guest and room must be known and `weight` must lie in `[0, 1]`.
    pub fn with_weight(mut self, guest: u32, room: u32, weight: f64) -> Result<Self> {
        self.set_weight(guest, room, weight)?;
        Ok(self)
    }

    pub fn add_guest(&mut self, guest: Guest) -> Result<&mut Self> {
        if self.guests.contains_key(&guest.id()) {
            return Err(Error::DuplicateId {
                kind: "guest",
                id: guest.id(),
            });
        }
        self.guests.insert(guest.id(), guest);
        Ok(self)
    }

    pub fn set_weight(&mut self, guest: u32, room: u32, weight: f64) -> Result<&mut Self> {
        if !self.guests.contains_key(&guest) {
            return Err(Error::UnknownGuest(guest));
        }
        if self.hotel.room(room).is_none() {
            return Err(Error::UnknownRoom(room));
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(Error::invalid(
                "weight",
                format!("guest {guest}, room {room}: {weight} is outside [0, 1]"),
            ));
        }
        self.weights.insert((guest, room), weight);
        Ok(self)
    }

    /// Number of guests added so far.
    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    /// Freezes the instance.
    ///
    /// # Errors
    /// At least one guest is required.
    pub fn build(&self) -> Result<Instance> {
        if self.guests.is_empty() {
            return Err(Error::Empty("guests"));
        }

        let guests: Vec<Guest> = self.guests.values().cloned().collect();
        let guest_index: HashMap<u32, usize> = guests
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id(), i))
            .collect();

        let rooms = self.hotel.rooms();
        let mut weights = vec![vec![0.0; rooms.len()]; guests.len()];
        for (&(guest, room), &w) in &self.weights {
            // Both ids were checked when the weight was set.
            if let (Some(&g), Some(r)) = (guest_index.get(&guest), self.hotel.room_index(room)) {
                weights[g][r] = w;
            }
        }

        let mut request_frequency = BTreeMap::new();
        for guest in &guests {
            *request_frequency.entry(guest.guest_type()).or_insert(0) += 1;
        }

        Ok(Instance {
            hotel: self.hotel.clone(),
            guests,
            weights,
            guest_index,
            request_frequency,
        })
    }
}

#[derive(Deserialize)]
struct InstanceFields {
    hotel: Hotel,
    guests: Vec<Guest>,
    #[serde(default)]
    weights: Vec<Vec<f64>>,
}

impl TryFrom<InstanceFields> for Instance {
    type Error = Error;

    fn try_from(f: InstanceFields) -> Result<Self> {
        let room_numbers: Vec<u32> = f.hotel.rooms().iter().map(|r| r.number()).collect();
        let guest_ids: Vec<u32> = f.guests.iter().map(|g| g.id()).collect();
        // An absent matrix means all-zero weights; a present one must be full.
        if !f.weights.is_empty() {
            if f.weights.len() != guest_ids.len() {
                return Err(Error::invalid(
                    "weights",
                    format!("{} rows for {} guests", f.weights.len(), guest_ids.len()),
                ));
            }
            if let Some((i, row)) = f
                .weights
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != room_numbers.len())
            {
                return Err(Error::invalid(
                    "weights",
                    format!(
                        "row {i} has {} columns for {} rooms",
                        row.len(),
                        room_numbers.len()
                    ),
                ));
            }
        }
        let mut builder = InstanceBuilder::new(f.hotel).with_guests(f.guests)?;
        // Rows follow the serialized guest order, columns the room order.
        for (row, &guest) in f.weights.iter().zip(&guest_ids) {
            for (&w, &room) in row.iter().zip(&room_numbers) {
                builder.set_weight(guest, room, w)?;
            }
        }
        builder.build()
    }
}
