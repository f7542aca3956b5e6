//! Service layer: request-sized operations over a [`Store`](crate::db::Store).
//!
//! `Journal` validates input and orchestrates load → mutate → save. It keeps
//! no state besides the store handle, so the CLI and the server can both
//! construct one at startup and share it freely.

mod exercise;
mod journal;
mod sets;
mod workout;

pub use journal::{Journal, Recorded};
