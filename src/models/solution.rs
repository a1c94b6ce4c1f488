//! Combined assignment and schedule, with guest-facing KPIs.
//!
//! For every guest whose assigned room is scheduled:
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Lateness | completion(room) - arrival (signed) |
//! | Tardiness | max(0, lateness) |
//! | On-time rate | Fraction of guests with zero tardiness |
//!
//! Guests without a room, or whose room is not scheduled yet, are left
//! out. The figures are computed once at construction.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Assignment, Instance, Schedule};
use crate::error::{Error, Result};
use crate::stats::Summary;

/// An assignment and a schedule for the same instance.
#[derive(Debug, Clone)]
pub struct Solution {
    assignment: Assignment,
    schedule: Schedule,
    /// Lateness per guest id.
    lateness: BTreeMap<u32, i64>,
    lateness_summary: Summary,
    tardiness_summary: Summary,
}

impl Solution {
    /// Pairs `assignment` and `schedule`.
    ///
    /// # Errors
    /// [`Error::InstanceMismatch`] if they were built for different instances.
    pub fn new(assignment: Assignment, schedule: Schedule) -> Result<Self> {
        let same = Arc::ptr_eq(assignment.instance(), schedule.instance())
            || assignment.instance() == schedule.instance();
        if !same {
            return Err(Error::InstanceMismatch);
        }

        let lateness: BTreeMap<u32, i64> = assignment
            .matching()
            .into_iter()
            .filter_map(|(guest, room)| {
                let completion = schedule.completion(room)?;
                let arrival = assignment.instance().guest(guest)?.arrival();
                Some((guest, completion - arrival))
            })
            .collect();

        let lateness_summary = Summary::of(lateness.values().map(|&l| l as f64));
        let tardiness_summary = Summary::of(lateness.values().map(|&l| l.max(0) as f64));

        Ok(Self {
            assignment,
            schedule,
            lateness,
            lateness_summary,
            tardiness_summary,
        })
    }

    pub fn instance(&self) -> &Arc<Instance> {
        self.assignment.instance()
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Splits the solution back into its parts.
    pub fn into_parts(self) -> (Assignment, Schedule) {
        (self.assignment, self.schedule)
    }

    /// Signed lateness of `guest`, if their room is assigned and scheduled.
    pub fn lateness(&self, guest: u32) -> Option<i64> {
        self.lateness.get(&guest).copied()
    }

    /// Tardiness of `guest`, if their room is assigned and scheduled.
    pub fn tardiness(&self, guest: u32) -> Option<i64> {
        self.lateness(guest).map(|l| l.max(0))
    }

    /// Lateness statistics over evaluated guests.
    pub fn lateness_summary(&self) -> Summary {
        self.lateness_summary
    }

    /// Tardiness statistics over evaluated guests.
    pub fn tardiness_summary(&self) -> Summary {
        self.tardiness_summary
    }

    /// Number of guests with positive tardiness.
    pub fn late_guests(&self) -> usize {
        self.lateness.values().filter(|&&l| l > 0).count()
    }

    /// Fraction of evaluated guests with zero tardiness; `1.0` if none.
    pub fn on_time_rate(&self) -> f64 {
        if self.lateness.is_empty() {
            return 1.0;
        }
        1.0 - self.late_guests() as f64 / self.lateness.len() as f64
    }

    /// Number of guests that contributed to the statistics.
    pub fn evaluated_guests(&self) -> usize {
        self.lateness.len()
    }
}
