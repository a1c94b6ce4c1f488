//! Greedy heuristics for room assignment and housekeeping.
//!
//! Two families share one calling convention: take an [`Instance`],
//! return a freshly built decision, never touch the input, and produce
//! the same output for the same instance.
//!
//! | Family | Trait | Strategies |
//! |--------|-------|-----------|
//! | Room assignment | [`AssignmentHeuristic`] | `Linear`, `Lexicographic`, `BestFirst`, `WorstFirst` |
//! | Housekeeping | [`HousekeepingHeuristic`] | `FirstAvailable`, `NeededFirst`, `NeededFirstNoWait` |
//!
//! Every strategy also implements [`Solver`], which returns the result as
//! a tagged [`Decision`] so callers can drive heuristics and external
//! optimizers through one interface. [`Pipeline`] runs one strategy of
//! each family and pairs the results into a [`Solution`].
//!
//! # Preconditions
//! Strategies that escalate through type tiers (every assignment strategy
//! plus `NeededFirst` and `NeededFirstNoWait`) require a feasible instance
//! (see [`Instance::is_feasible`]) and return [`Error::Infeasible`]
//! otherwise. `FirstAvailable` ignores guests and accepts any instance.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use u_hotel::heuristics::{AssignmentHeuristic, HousekeepingHeuristic, Linear, FirstAvailable};
//! use u_hotel::models::{Guest, Hotel, Instance, Room};
//!
//! let hotel = Hotel::builder(1)
//!     .with_room(Room::new(1, 1, 0, 2)?)?
//!     .build()?;
//! let instance = Arc::new(
//!     Instance::builder(hotel)
//!         .with_guest(Guest::new(1, 1, 5)?)?
//!         .build()?,
//! );
//!
//! let assignment = Linear.assign(&instance)?;
//! let schedule = FirstAvailable.schedule(&instance)?;
//! assert_eq!(assignment.room_of(1), Some(1));
//! assert_eq!(schedule.completion(1), Some(2));
//! # Ok::<(), u_hotel::Error>(())
//! ```

mod assignment;
mod housekeeping;

pub use assignment::{BestFirst, Lexicographic, Linear, WorstFirst};
pub use housekeeping::{
    makespan_lower_bound, minimum_type_set, FirstAvailable, NeededFirst, NeededFirstNoWait,
};

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{instrument, warn};

use crate::error::{Error, Result};
use crate::models::{Assignment, Instance, Schedule, Solution};

/// A strategy that matches guests to rooms.
pub trait AssignmentHeuristic: Send + Sync + Debug {
    /// Strategy name (e.g., "Linear").
    fn name(&self) -> &'static str;

    /// Builds a complete assignment for `instance`.
    fn assign(&self, instance: &Arc<Instance>) -> Result<Assignment>;

    fn description(&self) -> &'static str {
        self.name()
    }
}

/// A strategy that schedules room cleanings on the crew.
pub trait HousekeepingHeuristic: Send + Sync + Debug {
    /// Strategy name (e.g., "FirstAvailable").
    fn name(&self) -> &'static str;

    /// Builds a complete schedule for `instance`.
    fn schedule(&self, instance: &Arc<Instance>) -> Result<Schedule>;

    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Output of a [`Solver`].
#[derive(Debug, Clone)]
pub enum Decision {
    Assignment(Assignment),
    Schedule(Schedule),
    Solution(Solution),
}

impl Decision {
    /// The instance the decision was built for.
    pub fn instance(&self) -> &Arc<Instance> {
        match self {
            Decision::Assignment(a) => a.instance(),
            Decision::Schedule(s) => s.instance(),
            Decision::Solution(s) => s.instance(),
        }
    }

    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Decision::Assignment(a) => Some(a),
            Decision::Solution(s) => Some(s.assignment()),
            Decision::Schedule(_) => None,
        }
    }

    pub fn as_schedule(&self) -> Option<&Schedule> {
        match self {
            Decision::Schedule(s) => Some(s),
            Decision::Solution(s) => Some(s.schedule()),
            Decision::Assignment(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Decision::Solution(s) => Some(s),
            _ => None,
        }
    }
}

/// Uniform entry point over every decision-producing strategy.
pub trait Solver: Send + Sync + Debug {
    fn name(&self) -> String;

    fn solve(&self, instance: &Arc<Instance>) -> Result<Decision>;
}

macro_rules! assignment_solver {
    ($($ty:ty),* $(,)?) => {$(
        impl Solver for $ty {
            fn name(&self) -> String {
                AssignmentHeuristic::name(self).to_string()
            }

            fn solve(&self, instance: &Arc<Instance>) -> Result<Decision> {
                self.assign(instance).map(Decision::Assignment)
            }
        }
    )*};
}

macro_rules! housekeeping_solver {
    ($($ty:ty),* $(,)?) => {$(
        impl Solver for $ty {
            fn name(&self) -> String {
                HousekeepingHeuristic::name(self).to_string()
            }

            fn solve(&self, instance: &Arc<Instance>) -> Result<Decision> {
                self.schedule(instance).map(Decision::Schedule)
            }
        }
    )*};
}

assignment_solver!(Linear, Lexicographic, BestFirst, WorstFirst);
housekeeping_solver!(FirstAvailable, NeededFirst, NeededFirstNoWait);

/// Runs an assignment strategy and a housekeeping strategy on the same
/// instance and pairs the results.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<A, H> {
    pub assignment: A,
    pub housekeeping: H,
}

impl<A, H> Pipeline<A, H>
where
    A: AssignmentHeuristic,
    H: HousekeepingHeuristic,
{
    pub fn new(assignment: A, housekeeping: H) -> Self {
        Self {
            assignment,
            housekeeping,
        }
    }

    /// Builds the combined solution.
    #[instrument(skip_all, level = "debug", fields(
        assignment = self.assignment.name(),
        housekeeping = self.housekeeping.name(),
    ))]
    pub fn run(&self, instance: &Arc<Instance>) -> Result<Solution> {
        let assignment = self.assignment.assign(instance)?;
        let schedule = self.housekeeping.schedule(instance)?;
        Solution::new(assignment, schedule)
    }
}

impl<A, H> Solver for Pipeline<A, H>
where
    A: AssignmentHeuristic,
    H: HousekeepingHeuristic,
{
    fn name(&self) -> String {
        format!("{}+{}", self.assignment.name(), self.housekeeping.name())
    }

    fn solve(&self, instance: &Arc<Instance>) -> Result<Decision> {
        self.run(instance).map(Decision::Solution)
    }
}

/// Every built-in assignment strategy.
pub fn assignment_heuristics() -> Vec<Box<dyn AssignmentHeuristic>> {
    vec![
        Box::new(Linear),
        Box::new(Lexicographic),
        Box::new(BestFirst),
        Box::new(WorstFirst),
    ]
}

/// Every built-in housekeeping strategy.
pub fn housekeeping_heuristics() -> Vec<Box<dyn HousekeepingHeuristic>> {
    vec![
        Box::new(FirstAvailable),
        Box::new(NeededFirst),
        Box::new(NeededFirstNoWait),
    ]
}

fn require_feasible(instance: &Instance, heuristic: &'static str) -> Result<()> {
    if instance.is_feasible() {
        return Ok(());
    }
    warn!(
        heuristic,
        guests = instance.guests().len(),
        rooms = instance.rooms().len(),
        "rejecting infeasible instance"
    );
    Err(Error::Infeasible)
}
