//! Single-day hotel operations.
//!
//! Two coupled decisions for one day in a hotel: which room each arriving
//! guest gets (room assignment), and when each room is cleaned and by
//! which housekeeper (housekeeping). A guest is late when their room is
//! ready after they arrive.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Room`, `Guest`, `Housekeeper`, `Hotel`,
//!   `Instance`, and the decisions `Assignment`, `Schedule`, `Solution`
//! - **`feasibility`**: Whether the room supply covers every request, and by
//!   how much
//! - **`heuristics`**: Greedy assignment and list-scheduling strategies
//! - **`stats`**: Summary statistics maintained alongside the decisions
//! - **`validation`**: Batch input checks (duplicate ids, references, ranges)
//! - **`loading`**: CSV readers and writers
//! - **`generator`**: Random feasible instances from an explicit config
//!
//! # References
//!
//! - Graham (1969), "Bounds on multiprocessing timing anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod feasibility;
pub mod generator;
pub mod heuristics;
pub mod loading;
pub mod models;
pub mod stats;
pub mod validation;

pub use error::{Error, Result};
