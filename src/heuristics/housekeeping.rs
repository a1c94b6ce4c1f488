//! List-scheduling strategies for the housekeeping crew.
//!
//! # Algorithm
//!
//! 1. Order rooms by release time (stable; ties keep room-number order).
//! 2. Keep the crew in a min-heap keyed by `(makespan, id)`.
//! 3. For each room, pop the least-loaded housekeeper, append the room at
//!    `max(makespan, release) + 1` and push the housekeeper back.
//!
//! `NeededFirst` and `NeededFirstNoWait` additionally defer rooms whose
//! type is not required by the minimum type set until every needed room
//! is scheduled.
//!
//! # Reference
//! Graham (1969), "Bounds on multiprocessing timing anomalies"

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::sync::Arc;

use tracing::{debug, trace};

use super::{require_feasible, HousekeepingHeuristic};
use crate::error::{Error, Result};
use crate::models::{Instance, Room, Schedule};

/// Greedy list scheduling by release time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl HousekeepingHeuristic for FirstAvailable {
    fn name(&self) -> &'static str {
        "FirstAvailable"
    }

    /// Never looks at guests, so over-booked instances are scheduled too.
    fn schedule(&self, instance: &Arc<Instance>) -> Result<Schedule> {
        let mut crew = Crew::new(instance);
        for room in rooms_by_release(instance) {
            crew.clean(room)?;
        }
        Ok(crew.finish(self.name()))
    }

    fn description(&self) -> &'static str {
        "Least-loaded housekeeper, rooms by release time"
    }
}

/// Cleans rooms of the minimum type set first.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeededFirst;

impl HousekeepingHeuristic for NeededFirst {
    fn name(&self) -> &'static str {
        "NeededFirst"
    }

    fn schedule(&self, instance: &Arc<Instance>) -> Result<Schedule> {
        require_feasible(instance, self.name())?;
        schedule_needed_first(instance, false, self.name())
    }

    fn description(&self) -> &'static str {
        "Needed room types first, others postponed"
    }
}

/// Like [`NeededFirst`], but an idle housekeeper takes any released room.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeededFirstNoWait;

impl HousekeepingHeuristic for NeededFirstNoWait {
    fn name(&self) -> &'static str {
        "NeededFirstNoWait"
    }

    fn schedule(&self, instance: &Arc<Instance>) -> Result<Schedule> {
        require_feasible(instance, self.name())?;
        schedule_needed_first(instance, true, self.name())
    }

    fn description(&self) -> &'static str {
        "Needed room types first unless a housekeeper is idle"
    }
}

/// Room types that must be cleaned so every guest can be served.
///
/// Each guest, in id order, takes the smallest remaining type at or above
/// the request. The result is the lexicographically smallest multiset of
/// types (type -> count) covering all requests, including forced upgrades.
///
/// # Errors
/// [`Error::Infeasible`] if some guest finds no remaining type.
pub fn minimum_type_set(instance: &Instance) -> Result<BTreeMap<u32, usize>> {
    let mut available = instance.type_frequency().clone();
    let mut needed = BTreeMap::new();

    for guest in instance.guests() {
        let room_type = available
            .range(guest.guest_type()..)
            .find(|&(_, &count)| count > 0)
            .map(|(&t, _)| t)
            .ok_or(Error::Infeasible)?;
        if let Some(count) = available.get_mut(&room_type) {
            *count -= 1;
        }
        *needed.entry(room_type).or_insert(0) += 1;
    }

    Ok(needed)
}

/// Lower bound on the makespan of any schedule for `instance`.
///
/// The larger of the latest `release + process` over all rooms and the
/// total processing time spread evenly over the crew.
pub fn makespan_lower_bound(instance: &Instance) -> i64 {
    let rooms = instance.rooms();
    let latest = rooms
        .iter()
        .map(|r| r.release() + r.process())
        .max()
        .unwrap_or(0);
    let total: i64 = rooms.iter().map(Room::process).sum();
    let crew = i64::from(instance.crew_size().max(1));
    latest.max((total + crew - 1) / crew)
}

fn schedule_needed_first(
    instance: &Arc<Instance>,
    no_wait: bool,
    heuristic: &'static str,
) -> Result<Schedule> {
    let mut needed = minimum_type_set(instance)?;
    debug!(heuristic, needed = ?needed, "minimum type set");

    let mut crew = Crew::new(instance);
    let mut postponed = Vec::new();

    for room in rooms_by_release(instance) {
        let is_needed = needed.get(&room.room_type()).is_some_and(|&c| c > 0);
        if is_needed || (no_wait && crew.idle_by(room.release())) {
            if let Some(count) = needed.get_mut(&room.room_type()) {
                *count = count.saturating_sub(1);
            }
            crew.clean(room)?;
        } else {
            trace!(room = room.number(), "postponed");
            postponed.push(room);
        }
    }

    debug!(heuristic, postponed = postponed.len(), "scheduling postponed rooms");
    for room in postponed {
        crew.clean(room)?;
    }

    Ok(crew.finish(heuristic))
}

/// Rooms by ascending release; stable, so ties keep number order.
fn rooms_by_release(instance: &Instance) -> Vec<&Room> {
    let mut rooms: Vec<&Room> = instance.rooms().iter().collect();
    rooms.sort_by_key(|r| r.release());
    rooms
}

/// The crew queue of one scheduling run.
struct Crew {
    schedule: Schedule,
    /// `(makespan, id)`, smallest first; ties go to the lower id.
    queue: BinaryHeap<Reverse<(i64, u32)>>,
}

impl Crew {
    fn new(instance: &Arc<Instance>) -> Self {
        let schedule = Schedule::new(Arc::clone(instance));
        let queue = schedule
            .housekeepers()
            .iter()
            .map(|hk| Reverse((hk.makespan(), hk.id())))
            .collect();
        Self { schedule, queue }
    }

    /// Whether some housekeeper is free at `time`.
    fn idle_by(&self, time: i64) -> bool {
        self.queue
            .peek()
            .is_some_and(|Reverse((makespan, _))| *makespan <= time)
    }

    fn clean(&mut self, room: &Room) -> Result<()> {
        let Reverse((_, id)) = self
            .queue
            .pop()
            .ok_or(Error::Empty("housekeeping crew"))?;
        let entry = self.schedule.append(id, room.number())?;
        trace!(
            room = room.number(),
            housekeeper = id,
            start = entry.start,
            completion = entry.completion,
            "room scheduled"
        );
        self.queue.push(Reverse((entry.completion, id)));
        Ok(())
    }

    fn finish(self, heuristic: &'static str) -> Schedule {
        debug!(
            heuristic,
            rooms = self.schedule.scheduled_count(),
            makespan = self.schedule.makespan(),
            "schedule complete"
        );
        self.schedule
    }
}
