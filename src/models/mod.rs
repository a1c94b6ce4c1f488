//! Hotel domain models.
//!
//! Value types describe the day's problem and are frozen once built;
//! decision types are built up incrementally by heuristics or external
//! solvers and validate every mutation.
//!
//! | Type | Role | Mutability |
//! |------|------|------------|
//! | Room | Cleanable, typed inventory item | Immutable |
//! | Guest | Typed request with an arrival time | Immutable |
//! | Hotel | Rooms + crew size | Immutable (via builder) |
//! | Instance | Hotel + guests + weights | Immutable (via builder) |
//! | Housekeeper | One crew member's cleaning list | Inside a Schedule |
//! | Assignment | Guest → room matching | `assign` / `reset` |
//! | Schedule | Room → housekeeper × start | `add` / `append` / `reset` |
//! | Solution | Assignment + Schedule KPIs | Read-only |

mod assignment;
mod guest;
mod hotel;
mod housekeeper;
mod instance;
mod room;
mod schedule;
mod solution;

pub use assignment::Assignment;
pub use guest::Guest;
pub use hotel::{Hotel, HotelBuilder};
pub use housekeeper::{Cleaning, Housekeeper};
pub use instance::{Instance, InstanceBuilder};
pub use room::Room;
pub use schedule::{Entry, Schedule};
pub use solution::Solution;
