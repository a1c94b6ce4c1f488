//! Guest-room assignment.
//!
//! A partial injective matching between the guests and rooms of one
//! [`Instance`]. Every pair must satisfy `room.type >= guest.type`.
//! Satisfaction (the pair's weight) and upgrade (`room.type - guest.type`)
//! statistics are updated on every successful [`Assignment::assign`] and
//! always equal a from-scratch recomputation over the current matching.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Instance;
use crate::error::{Error, Result};
use crate::stats::{RunningStats, Summary};

/// A (possibly partial) assignment of guests to rooms.
#[derive(Debug, Clone)]
pub struct Assignment {
    instance: Arc<Instance>,
    /// Room index per guest index.
    room_of: Vec<Option<usize>>,
    /// Guest index per room index.
    guest_in: Vec<Option<usize>>,
    /// Open room count per type.
    open_by_type: BTreeMap<u32, usize>,
    satisfaction: RunningStats,
    upgrade: RunningStats,
}

impl Assignment {
    /// Creates an empty assignment for `instance`.
    pub fn new(instance: Arc<Instance>) -> Self {
        let room_of = vec![None; instance.guests().len()];
        let guest_in = vec![None; instance.rooms().len()];
        let open_by_type = instance.type_frequency().clone();
        Self {
            instance,
            room_of,
            guest_in,
            open_by_type,
            satisfaction: RunningStats::new(),
            upgrade: RunningStats::new(),
        }
    }

    /// The instance this assignment belongs to.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Places `guest` in `room`.
    ///
    /// # Errors
    /// Fails without changing anything if either id is unknown, the guest
    /// already has a room, the room is taken, or the room type is lower
    /// than the requested type.
    pub fn assign(&mut self, guest: u32, room: u32) -> Result<()> {
        let gi = self
            .instance
            .guest_index(guest)
            .ok_or(Error::UnknownGuest(guest))?;
        let ri = self
            .instance
            .room_index(room)
            .ok_or(Error::UnknownRoom(room))?;

        if let Some(current) = self.room_of[gi] {
            return Err(Error::GuestAssigned {
                guest,
                room: self.instance.rooms()[current].number(),
            });
        }
        if let Some(holder) = self.guest_in[ri] {
            return Err(Error::RoomOccupied {
                room,
                guest: self.instance.guests()[holder].id(),
            });
        }

        let g = &self.instance.guests()[gi];
        let r = &self.instance.rooms()[ri];
        if !r.serves(g.guest_type()) {
            return Err(Error::Downgrade {
                guest,
                guest_type: g.guest_type(),
                room,
                room_type: r.room_type(),
            });
        }

        let upgrade = r.room_type() - g.guest_type();
        let weight = self.instance.weight_at(gi, ri);
        let room_type = r.room_type();

        self.room_of[gi] = Some(ri);
        self.guest_in[ri] = Some(gi);
        if let Some(open) = self.open_by_type.get_mut(&room_type) {
            *open -= 1;
        }
        self.satisfaction.push(weight);
        self.upgrade.push(f64::from(upgrade));
        Ok(())
    }

    /// Clears the matching and all statistics.
    pub fn reset(&mut self) {
        self.room_of.iter_mut().for_each(|r| *r = None);
        self.guest_in.iter_mut().for_each(|g| *g = None);
        self.open_by_type = self.instance.type_frequency().clone();
        self.satisfaction.reset();
        self.upgrade.reset();
    }

    /// Room number held by `guest`.
    pub fn room_of(&self, guest: u32) -> Option<u32> {
        let gi = self.instance.guest_index(guest)?;
        self.room_of[gi].map(|ri| self.instance.rooms()[ri].number())
    }

    /// Guest id occupying `room`.
    pub fn guest_in(&self, room: u32) -> Option<u32> {
        let ri = self.instance.room_index(room)?;
        self.guest_in[ri].map(|gi| self.instance.guests()[gi].id())
    }

    /// Whether `room` exists and has no guest.
    pub fn is_room_open(&self, room: u32) -> bool {
        self.instance
            .room_index(room)
            .is_some_and(|ri| self.guest_in[ri].is_none())
    }

    /// Whether `guest` exists and has a room.
    pub fn is_guest_assigned(&self, guest: u32) -> bool {
        self.instance
            .guest_index(guest)
            .is_some_and(|gi| self.room_of[gi].is_some())
    }

    /// Smallest room type that can still serve `guest`.
    ///
    /// This is the lowest type at or above the request with an open room.
    /// Taking a room of this type never makes the remaining guests
    /// unservable: compatible room sets are nested, so a best-fit choice
    /// can always be exchanged into any complete matching.
    ///
    /// Returns `None` for unknown guests or when no compatible room is open.
    pub fn min_type(&self, guest: u32) -> Option<u32> {
        let requested = self.instance.guest(guest)?.guest_type();
        self.open_by_type
            .range(requested..)
            .find(|&(_, &open)| open > 0)
            .map(|(&t, _)| t)
    }

    /// Number of open rooms of type `room_type`.
    pub fn open_rooms_of_type(&self, room_type: u32) -> usize {
        self.open_by_type.get(&room_type).copied().unwrap_or(0)
    }

    /// Number of assigned guests.
    pub fn assigned_count(&self) -> usize {
        self.satisfaction.count()
    }

    /// Whether every guest has a room.
    pub fn is_complete(&self) -> bool {
        self.assigned_count() == self.room_of.len()
    }

    /// Copy of the current matching, guest id to room number.
    pub fn matching(&self) -> BTreeMap<u32, u32> {
        self.pairs().collect()
    }

    /// Satisfaction statistics over assigned guests.
    pub fn satisfaction(&self) -> Summary {
        self.satisfaction.summary()
    }

    /// Upgrade statistics over assigned guests.
    pub fn upgrades(&self) -> Summary {
        self.upgrade.summary()
    }

    /// Satisfaction statistics recomputed from the matching.
    pub fn recompute_satisfaction(&self) -> Summary {
        Summary::of(self.pairs().map(|(g, r)| self.instance.weight(g, r)))
    }

    /// Upgrade statistics recomputed from the matching.
    pub fn recompute_upgrades(&self) -> Summary {
        Summary::of(self.index_pairs().map(|(gi, ri)| {
            let g = &self.instance.guests()[gi];
            let r = &self.instance.rooms()[ri];
            f64::from(r.room_type() - g.guest_type())
        }))
    }

    fn index_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.room_of
            .iter()
            .enumerate()
            .filter_map(|(gi, ri)| ri.map(|ri| (gi, ri)))
    }

    fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.index_pairs().map(|(gi, ri)| {
            (
                self.instance.guests()[gi].id(),
                self.instance.rooms()[ri].number(),
            )
        })
    }
}
