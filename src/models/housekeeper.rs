//! Housekeeper model.
//!
//! A housekeeper cleans one room at a time. Cleaning room `r` from
//! `start` occupies the closed interval `[start, start + r.process - 1]`
//! and may only begin strictly after `r.release`.

use serde::Serialize;

use super::Room;
use crate::error::{Error, Result};

/// One cleaning job on a housekeeper's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cleaning {
    /// Room number.
    pub room: u32,
    /// First time unit of the cleaning.
    pub start: i64,
    /// Last time unit of the cleaning.
    pub completion: i64,
}

impl Cleaning {
    #[inline]
    fn overlaps(&self, start: i64, completion: i64) -> bool {
        self.start <= completion && start <= self.completion
    }
}

/// A member of the housekeeping crew and the rooms assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Housekeeper {
    id: u32,
    cleanings: Vec<Cleaning>,
    makespan: i64,
    busy_time: i64,
}

impl Housekeeper {
    /// Idle housekeepers with ids `1..=size`.
    pub(crate) fn crew(size: u32) -> Vec<Self> {
        (1..=size)
            .map(|id| Self {
                id,
                cleanings: Vec::new(),
                makespan: 0,
                busy_time: 0,
            })
            .collect()
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Latest completion over all assigned rooms, `0` when idle.
    #[inline]
    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    /// Total cleaning time assigned.
    #[inline]
    pub fn busy_time(&self) -> i64 {
        self.busy_time
    }

    /// Assigned cleanings in insertion order.
    pub fn cleanings(&self) -> &[Cleaning] {
        &self.cleanings
    }

    /// Assigned room numbers in insertion order.
    pub fn rooms(&self) -> Vec<u32> {
        self.cleanings.iter().map(|c| c.room).collect()
    }

    /// Earliest start for `room` after everything already on the list.
    pub fn next_start(&self, room: &Room) -> i64 {
        self.makespan.max(room.release()) + 1
    }

    /// Checks whether `room` may be cleaned from `start` without touching state.
    pub fn check(&self, room: &Room, start: i64) -> Result<()> {
        if start <= room.release() {
            return Err(Error::StartBeforeRelease {
                room: room.number(),
                start,
                release: room.release(),
            });
        }
        let completion = room.completion_from(start);
        if let Some(other) = self
            .cleanings
            .iter()
            .find(|c| c.overlaps(start, completion))
        {
            return Err(Error::Overlap {
                housekeeper: self.id,
                room: room.number(),
                other: other.room,
            });
        }
        Ok(())
    }

    /// Adds `room` starting at `start`.
    ///
    /// Returns the completion time.
    pub(crate) fn add(&mut self, room: &Room, start: i64) -> Result<i64> {
        self.check(room, start)?;
        let completion = room.completion_from(start);
        self.cleanings.push(Cleaning {
            room: room.number(),
            start,
            completion,
        });
        self.makespan = self.makespan.max(completion);
        self.busy_time += room.process();
        Ok(completion)
    }

    pub(crate) fn clear(&mut self) {
        self.cleanings.clear();
        self.makespan = 0;
        self.busy_time = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(number: u32, release: i64, process: i64) -> Room {
        Room::new(number, 1, release, process).unwrap()
    }

    fn housekeeper(id: u32) -> Housekeeper {
        Housekeeper::crew(id).pop().unwrap()
    }

    #[test]
    fn test_add_sequential() {
        let mut h = housekeeper(1);
        let r1 = room(1, 0, 2);
        let r2 = room(2, 3, 2);

        assert_eq!(h.next_start(&r1), 1);
        assert_eq!(h.add(&r1, 1).unwrap(), 2);
        assert_eq!(h.next_start(&r2), 4);
        assert_eq!(h.add(&r2, 4).unwrap(), 5);
        assert_eq!(h.makespan(), 5);
        assert_eq!(h.busy_time(), 4);
        assert_eq!(h.rooms(), vec![1, 2]);
    }

    #[test]
    fn test_start_must_follow_release() {
        let mut h = housekeeper(1);
        let r = room(1, 5, 2);
        assert!(matches!(
            h.add(&r, 5),
            Err(Error::StartBeforeRelease { room: 1, .. })
        ));
        assert!(h.cleanings().is_empty());
        assert_eq!(h.add(&r, 6).unwrap(), 7);
    }

    #[test]
    fn test_overlap_rejected() {
        let mut h = housekeeper(3);
        h.add(&room(1, 0, 3), 1).unwrap(); // [1, 3]
        let err = h.add(&room(2, 0, 2), 3).unwrap_err(); // [3, 4]
        assert!(matches!(
            err,
            Error::Overlap {
                housekeeper: 3,
                room: 2,
                other: 1
            }
        ));
        assert_eq!(h.makespan(), 3);
    }

    #[test]
    fn test_fill_gap_before_existing() {
        let mut h = housekeeper(1);
        h.add(&room(1, 0, 2), 10).unwrap(); // [10, 11]
        assert_eq!(h.add(&room(2, 0, 3), 2).unwrap(), 4); // [2, 4]
        assert_eq!(h.makespan(), 11);
        assert!(h.add(&room(3, 0, 6), 5).is_err()); // [5, 10]
        assert_eq!(h.add(&room(4, 0, 5), 5).unwrap(), 9);
    }

    #[test]
    fn test_clear() {
        let mut h = housekeeper(1);
        h.add(&room(1, 0, 2), 1).unwrap();
        h.clear();
        assert_eq!(h.makespan(), 0);
        assert_eq!(h.busy_time(), 0);
        assert!(h.cleanings().is_empty());
    }

    #[test]
    fn test_crew_ids() {
        assert!(Housekeeper::crew(0).is_empty());
        let crew = Housekeeper::crew(3);
        assert_eq!(crew.iter().map(Housekeeper::id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(crew.iter().all(|h| h.makespan() == 0 && h.cleanings().is_empty()));
    }
}
