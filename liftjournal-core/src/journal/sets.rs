use log::info;

use crate::error::{Entity, LiftError, Result};
use crate::journal::{Journal, Recorded};

impl Journal {
    /// Appends a set to a saved exercise, re-saving its owning workout.
    pub fn record_set(&self, exercise_id: i32, weight: i32, reps: i32) -> Result<Recorded> {
        let owner = self.store.find_exercise(exercise_id)?;
        let mut workout = self.store.get_workout(owner.workout_id)?;

        workout
            .exercise_mut(exercise_id)
            .ok_or_else(|| LiftError::not_found(Entity::Exercise, exercise_id))?
            .add_set(weight, reps)?;
        self.store.save(&mut workout)?;

        let id = workout
            .exercise(exercise_id)
            .and_then(|e| e.sets().last())
            .and_then(|s| s.id())
            .ok_or_else(|| LiftError::storage("saved set has no id"))?;
        info!(
            "Recorded {} x {} on exercise {} (set {})",
            weight, reps, exercise_id, id
        );
        Ok(Recorded { id, workout })
    }
}
