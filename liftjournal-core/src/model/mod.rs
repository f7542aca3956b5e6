//! Storage-independent shapes of the workout → exercise → set graph.
//!
//! Ids and timestamps are `None` until the graph has been saved through a
//! [`Store`](crate::db::Store). Children can only be appended, never removed;
//! removal happens by deleting the owning workout.

mod catalog;
mod exercise;
mod set;
mod workout;

pub use catalog::ExerciseName;
pub use exercise::Exercise;
pub use set::Set;
pub use workout::{Workout, WorkoutSummary};
