//! Housekeeping schedule.
//!
//! Maps each room of one [`Instance`] to the housekeeper cleaning it and
//! the start time. Rooms are added one at a time; every call re-checks
//! the housekeeper invariants (start strictly after release, no
//! overlapping cleanings) and either applies completely or not at all.
//!
//! Completion of a room is `start + process - 1`. Completion statistics
//! are maintained incrementally.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Housekeeper, Instance};
use crate::error::{Error, Result};
use crate::stats::{RunningStats, Summary};

/// Where and when a room is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Housekeeper id.
    pub housekeeper: u32,
    /// First time unit of the cleaning.
    pub start: i64,
    /// Last time unit of the cleaning.
    pub completion: i64,
}

/// A (possibly partial) housekeeping schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    instance: Arc<Instance>,
    /// Housekeepers `1..=crew_size`, stored at `id - 1`.
    housekeepers: Vec<Housekeeper>,
    /// Entry per room index.
    entries: Vec<Option<Entry>>,
    completion: RunningStats,
}

impl Schedule {
    /// Creates an empty schedule with one idle housekeeper per crew member.
    pub fn new(instance: Arc<Instance>) -> Self {
        let housekeepers = Housekeeper::crew(instance.crew_size());
        let entries = vec![None; instance.rooms().len()];
        Self {
            instance,
            housekeepers,
            entries,
            completion: RunningStats::new(),
        }
    }

    /// The instance this schedule belongs to.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Schedules `room` on `housekeeper` starting at `start`.
    ///
    /// # Errors
    /// Fails without changing anything if the room or housekeeper is
    /// unknown, the room is already scheduled, `start` is not after the
    /// room's release, or the cleaning overlaps another one of the same
    /// housekeeper.
    pub fn add(&mut self, housekeeper: u32, room: u32, start: i64) -> Result<Entry> {
        let ri = self.check_room(room)?;
        let hi = self.housekeeper_position(housekeeper)?;

        let r = &self.instance.rooms()[ri];
        let completion = self.housekeepers[hi].add(r, start)?;
        let entry = Entry {
            housekeeper,
            start,
            completion,
        };
        self.entries[ri] = Some(entry);
        self.completion.push(completion as f64);
        Ok(entry)
    }

    /// Schedules `room` at the earliest start after both the housekeeper's
    /// current makespan and the room's release.
    pub fn append(&mut self, housekeeper: u32, room: u32) -> Result<Entry> {
        let ri = self.check_room(room)?;
        let hi = self.housekeeper_position(housekeeper)?;
        let start = self.housekeepers[hi].next_start(&self.instance.rooms()[ri]);
        self.add(housekeeper, room, start)
    }

    /// Clears every housekeeper and all statistics.
    pub fn reset(&mut self) {
        self.housekeepers.iter_mut().for_each(Housekeeper::clear);
        self.entries.iter_mut().for_each(|e| *e = None);
        self.completion.reset();
    }

    pub fn housekeepers(&self) -> &[Housekeeper] {
        &self.housekeepers
    }

    pub fn housekeeper(&self, id: u32) -> Option<&Housekeeper> {
        self.housekeeper_position(id)
            .ok()
            .map(|i| &self.housekeepers[i])
    }

    /// Entry of a scheduled room.
    pub fn entry(&self, room: u32) -> Option<Entry> {
        self.instance.room_index(room).and_then(|ri| self.entries[ri])
    }

    pub fn start(&self, room: u32) -> Option<i64> {
        self.entry(room).map(|e| e.start)
    }

    pub fn completion(&self, room: u32) -> Option<i64> {
        self.entry(room).map(|e| e.completion)
    }

    pub fn housekeeper_of(&self, room: u32) -> Option<u32> {
        self.entry(room).map(|e| e.housekeeper)
    }

    pub fn is_scheduled(&self, room: u32) -> bool {
        self.entry(room).is_some()
    }

    /// Copy of every scheduled entry by room number.
    pub fn entries(&self) -> BTreeMap<u32, Entry> {
        self.instance
            .rooms()
            .iter()
            .zip(&self.entries)
            .filter_map(|(r, e)| e.map(|e| (r.number(), e)))
            .collect()
    }

    /// Number of scheduled rooms.
    pub fn scheduled_count(&self) -> usize {
        self.completion.count()
    }

    /// Whether every room is scheduled.
    pub fn is_complete(&self) -> bool {
        self.scheduled_count() == self.entries.len()
    }

    /// Latest completion over all rooms, `0` when empty.
    pub fn makespan(&self) -> i64 {
        self.housekeepers
            .iter()
            .map(Housekeeper::makespan)
            .max()
            .unwrap_or(0)
    }

    /// Completion-time statistics over scheduled rooms.
    pub fn completions(&self) -> Summary {
        self.completion.summary()
    }

    /// Completion-time statistics recomputed from the entries.
    pub fn recompute_completions(&self) -> Summary {
        Summary::of(self.entries.iter().flatten().map(|e| e.completion as f64))
    }

    /// Number of rooms whose completion is `< t`.
    ///
    /// Scans the entries, so it is independent of how large the times are.
    pub fn rooms_available_at(&self, t: i64) -> usize {
        self.entries
            .iter()
            .flatten()
            .filter(|e| e.completion < t)
            .count()
    }

    /// `available[t]` is the number of rooms whose completion is `< t`,
    /// for `t` in `0..=makespan + 1`.
    ///
    /// Time and memory are linear in the makespan, not in the number of
    /// rooms. Use [`Schedule::rooms_available_at`] when releases are large.
    pub fn rooms_available(&self) -> Vec<usize> {
        let horizon = self.makespan() as usize + 2;
        let mut finished_at = vec![0usize; horizon];
        for e in self.entries.iter().flatten() {
            // Completions are at least 1 since starts follow a release >= 0.
            finished_at[e.completion as usize] += 1;
        }

        let mut available = vec![0usize; horizon];
        for t in 1..horizon {
            available[t] = available[t - 1] + finished_at[t - 1];
        }
        available
    }

    /// Busy time divided by makespan for one housekeeper.
    ///
    /// Returns `None` if the schedule is empty or the housekeeper unknown.
    pub fn utilization(&self, housekeeper: u32) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        self.housekeeper(housekeeper)
            .map(|h| h.busy_time() as f64 / horizon as f64)
    }

    /// Utilization of every housekeeper, using the schedule makespan as horizon.
    pub fn all_utilizations(&self) -> BTreeMap<u32, f64> {
        self.housekeepers
            .iter()
            .filter_map(|h| self.utilization(h.id()).map(|u| (h.id(), u)))
            .collect()
    }

    fn check_room(&self, room: u32) -> Result<usize> {
        let ri = self
            .instance
            .room_index(room)
            .ok_or(Error::UnknownRoom(room))?;
        if self.entries[ri].is_some() {
            return Err(Error::RoomScheduled(room));
        }
        Ok(ri)
    }

    fn housekeeper_position(&self, id: u32) -> Result<usize> {
        let i = (id as usize)
            .checked_sub(1)
            .filter(|&i| i < self.housekeepers.len())
            .ok_or(Error::UnknownHousekeeper(id))?;
        Ok(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Guest, Hotel, Room};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn instance(rooms: Vec<Room>, crew: u32) -> Arc<Instance> {
        let hotel = Hotel::builder(crew).with_rooms(rooms).unwrap().build().unwrap();
        Arc::new(
            Instance::builder(hotel)
                .with_guest(Guest::new(1, 1, 0).unwrap())
                .unwrap()
                .build()
                .unwrap(),
        )
    }

    fn two_rooms() -> Arc<Instance> {
        instance(
            vec![
                Room::new(1, 1, 0, 2).unwrap(),
                Room::new(2, 1, 3, 2).unwrap(),
            ],
            1,
        )
    }

    #[test]
    fn test_append() {
        let mut s = Schedule::new(two_rooms());
        let e1 = s.append(1, 1).unwrap();
        assert_eq!((e1.start, e1.completion), (1, 2));
        let e2 = s.append(1, 2).unwrap();
        assert_eq!((e2.start, e2.completion), (4, 5));
        assert_eq!(s.makespan(), 5);
        assert!(s.is_complete());
        assert_eq!(s.housekeeper_of(2), Some(1));
        assert_eq!(s.start(2), Some(4));
        assert_eq!(s.completion(1), Some(2));
    }

    #[test]
    fn test_errors_leave_state_unchanged() {
        let mut s = Schedule::new(two_rooms());
        s.add(1, 1, 1).unwrap(); // [1, 2]

        assert!(matches!(s.add(1, 1, 10), Err(Error::RoomScheduled(1))));
        assert!(matches!(s.add(2, 2, 10), Err(Error::UnknownHousekeeper(2))));
        assert!(matches!(s.add(0, 2, 10), Err(Error::UnknownHousekeeper(0))));
        assert!(matches!(s.add(1, 7, 10), Err(Error::UnknownRoom(7))));
        assert!(matches!(
            s.add(1, 2, 3),
            Err(Error::StartBeforeRelease {
                room: 2,
                start: 3,
                release: 3
            })
        ));

        let rooms = instance(
            vec![
                Room::new(1, 1, 0, 2).unwrap(),
                Room::new(2, 1, 0, 2).unwrap(),
            ],
            1,
        );
        let mut s2 = Schedule::new(rooms);
        s2.add(1, 1, 3).unwrap(); // [3, 4]
        assert!(matches!(s2.add(1, 2, 2), Err(Error::Overlap { .. })));
        assert_eq!(s2.scheduled_count(), 1);
        assert!(!s2.is_scheduled(2));
        s2.add(1, 2, 5).unwrap();

        assert_eq!(s.scheduled_count(), 1);
        assert!(s.completions().approx_eq(&s.recompute_completions(), 1e-9));
    }

    #[test]
    fn test_rooms_available() {
        let mut s = Schedule::new(two_rooms());
        s.append(1, 1).unwrap(); // completes 2
        s.append(1, 2).unwrap(); // completes 5
        assert_eq!(s.rooms_available(), vec![0, 0, 0, 1, 1, 1, 2]);

        let empty = Schedule::new(two_rooms());
        assert_eq!(empty.rooms_available(), vec![0, 0]);

        for (t, &n) in s.rooms_available().iter().enumerate() {
            assert_eq!(s.rooms_available_at(t as i64), n);
        }
    }

    #[test]
    fn test_rooms_available_at_far_horizon() {
        let release = 1_000_000_000_000;
        let mut s = Schedule::new(instance(vec![Room::new(1, 1, release, 2).unwrap()], 1));
        let entry = s.append(1, 1).unwrap();
        assert_eq!(entry.completion, release + 2);
        assert_eq!(s.rooms_available_at(release + 2), 0);
        assert_eq!(s.rooms_available_at(release + 3), 1);
        assert_eq!(s.rooms_available_at(i64::MAX), 1);
    }

    #[test]
    fn test_entries_are_copies() {
        let mut s = Schedule::new(two_rooms());
        s.append(1, 1).unwrap();
        let snapshot = s.entries();
        s.append(1, 2).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(s.entries().len(), 2);
    }

    #[test]
    fn test_utilization() {
        let mut s = Schedule::new(two_rooms());
        assert_eq!(s.utilization(1), None);
        s.append(1, 1).unwrap();
        s.append(1, 2).unwrap();
        // Busy 4 over makespan 5.
        assert!((s.utilization(1).unwrap() - 0.8).abs() < 1e-12);
        assert_eq!(s.all_utilizations().len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut s = Schedule::new(two_rooms());
        s.append(1, 1).unwrap();
        s.reset();
        assert_eq!(s.scheduled_count(), 0);
        assert_eq!(s.makespan(), 0);
        assert_eq!(s.completions(), Summary::default());
        assert!(s.housekeeper(1).unwrap().cleanings().is_empty());
        s.append(1, 1).unwrap();
    }

    #[test]
    fn test_random_ops_keep_invariants() {
        let rooms: Vec<Room> = (1..=8)
            .map(|n| Room::new(n, 1, i64::from(n % 4), i64::from(n % 3) + 1).unwrap())
            .collect();
        let inst = instance(rooms, 3);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut s = Schedule::new(Arc::clone(&inst));

        for _ in 0..600 {
            let room = rng.random_range(1..=8);
            let housekeeper = rng.random_range(1..=3);
            match rng.random_range(0..10) {
                0 => s.reset(),
                1..=4 => {
                    let _ = s.append(housekeeper, room);
                }
                _ => {
                    let start = rng.random_range(0..20);
                    let _ = s.add(housekeeper, room, start);
                }
            }

            assert!(s.completions().approx_eq(&s.recompute_completions(), 1e-9));
            for h in s.housekeepers() {
                let cleanings = h.cleanings();
                for (i, a) in cleanings.iter().enumerate() {
                    let room = inst.room(a.room).unwrap();
                    assert!(a.start > room.release());
                    for b in &cleanings[i + 1..] {
                        assert!(a.completion < b.start || b.completion < a.start);
                    }
                }
            }
        }
    }
}
