//! Thin request handlers: extract, call the journal, render JSON.

pub mod exercises;
pub mod sets;
pub mod workouts;
