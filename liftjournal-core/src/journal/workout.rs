use log::info;

use crate::db::DeletedRows;
use crate::error::Result;
use crate::journal::Journal;
use crate::model::{Workout, WorkoutSummary};

impl Journal {
    /// Creates and persists an empty workout dated today.
    pub fn start_workout(&self) -> Result<Workout> {
        let mut workout = Workout::new();
        self.store.save(&mut workout)?;
        info!("Started {}", workout);
        Ok(workout)
    }

    pub fn list_workouts(&self) -> Result<Vec<WorkoutSummary>> {
        self.store.list_workouts()
    }

    pub fn view_workout(&self, workout_id: i32) -> Result<Workout> {
        self.store.get_workout(workout_id)
    }

    pub fn delete_workout(&self, workout_id: i32) -> Result<DeletedRows> {
        self.store.delete_workout(workout_id)
    }

    /// Drops and recreates the schema. Every workout is lost.
    pub fn reinitialize(&self) -> Result<()> {
        self.store.reinitialize()
    }
}
