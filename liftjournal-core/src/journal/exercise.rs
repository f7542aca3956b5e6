use log::info;

use crate::db::ExerciseRef;
use crate::error::{LiftError, Result};
use crate::journal::{Journal, Recorded};
use crate::model::{ExerciseName, Set};

impl Journal {
    /// Appends an empty exercise called `name` to a saved workout.
    pub fn add_exercise(&self, workout_id: i32, name: &str) -> Result<Recorded> {
        let mut workout = self.store.get_workout(workout_id)?;
        workout.add_exercise(name)?;
        self.store.save(&mut workout)?;

        let id = workout
            .exercises()
            .last()
            .and_then(|e| e.id())
            .ok_or_else(|| LiftError::storage("saved exercise has no id"))?;
        info!("Added {} (exercise {}) to workout {}", name, id, workout_id);
        Ok(Recorded { id, workout })
    }

    pub fn find_exercise(&self, exercise_id: i32) -> Result<ExerciseRef> {
        self.store.find_exercise(exercise_id)
    }

    /// Every set logged under `name`, across all workouts.
    pub fn sets_for_exercise(&self, name: &str) -> Result<Vec<Set>> {
        let name = name.parse::<ExerciseName>()?;
        self.store.get_sets_for_exercise(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::error::Entity;

    #[test]
    fn add_exercise_returns_new_id() {
        let journal = Journal::new(Store::in_memory().unwrap());
        let workout_id = journal.start_workout().unwrap().id().unwrap();

        let added = journal.add_exercise(workout_id, "Deadlift").unwrap();
        let exercise = added.workout.exercise(added.id).unwrap();
        assert_eq!(exercise.name(), ExerciseName::Deadlift);
        assert!(exercise.sets().is_empty());

        let found = journal.find_exercise(added.id).unwrap();
        assert_eq!(found.workout_id, workout_id);
        assert_eq!(found.name, "Deadlift");
    }

    #[test]
    fn invalid_name_is_not_persisted() {
        let journal = Journal::new(Store::in_memory().unwrap());
        let workout_id = journal.start_workout().unwrap().id().unwrap();

        let err = journal.add_exercise(workout_id, "Zercher").unwrap_err();
        assert!(err.is_validation());
        assert!(journal.view_workout(workout_id).unwrap().exercises().is_empty());
    }

    #[test]
    fn unknown_workout_is_not_found() {
        let journal = Journal::new(Store::in_memory().unwrap());
        let err = journal.add_exercise(3, "Squat").unwrap_err();
        assert!(matches!(
            err,
            LiftError::NotFound {
                entity: Entity::Workout,
                id: 3
            }
        ));
    }

    #[test]
    fn sets_for_exercise_validates_name() {
        let journal = Journal::new(Store::in_memory().unwrap());
        assert!(journal.sets_for_exercise("Curl").unwrap_err().is_validation());
        assert!(journal.sets_for_exercise("Bench").unwrap().is_empty());
    }
}
