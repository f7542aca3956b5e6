use chrono::{NaiveDate, NaiveDateTime};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::db::schema;
use crate::error::{LiftError, Result};
use crate::model::{Exercise, ExerciseName, Set, Workout};

// Workout rows
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::workouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkoutRow {
    pub id: i32,
    pub date: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub version: i32,
}

#[derive(Insertable)]
#[diesel(table_name = schema::workouts)]
pub struct NewWorkoutRow {
    pub date: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub version: i32,
}

impl WorkoutRow {
    pub fn into_workout(self, exercises: Vec<Exercise>) -> Workout {
        Workout {
            id: Some(self.id),
            date: self.date,
            updated_at: Some(self.updated_at),
            version: self.version,
            exercises,
            dirty: false,
        }
    }
}

// Exercise rows
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(WorkoutRow, foreign_key = workout_id))]
#[diesel(table_name = schema::exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExerciseRow {
    pub id: i32,
    pub workout_id: i32,
    pub name: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = schema::exercises)]
pub struct NewExerciseRow<'a> {
    pub workout_id: i32,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl ExerciseRow {
    /// Rebuilds the domain exercise. A name outside the catalog means the
    /// table was written by something else, so it surfaces as a storage failure.
    pub fn into_exercise(self, sets: Vec<SetRow>) -> Result<Exercise> {
        let name = self.name.parse::<ExerciseName>().map_err(|_| {
            LiftError::storage(format!(
                "exercise {} has unknown name '{}'",
                self.id, self.name
            ))
        })?;
        Ok(Exercise {
            id: Some(self.id),
            workout_id: Some(self.workout_id),
            name,
            updated_at: Some(self.updated_at),
            sets: sets.into_iter().map(Set::from).collect(),
            dirty: false,
        })
    }
}

/// Where an exercise lives, without loading its sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseRef {
    pub id: i32,
    pub workout_id: i32,
    pub name: String,
}

impl From<ExerciseRow> for ExerciseRef {
    fn from(row: ExerciseRow) -> Self {
        Self {
            id: row.id,
            workout_id: row.workout_id,
            name: row.name,
        }
    }
}

// Set rows
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(ExerciseRow, foreign_key = exercise_id))]
#[diesel(table_name = schema::sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SetRow {
    pub id: i32,
    pub exercise_id: i32,
    pub weight: i32,
    pub reps: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = schema::sets)]
pub struct NewSetRow {
    pub exercise_id: i32,
    pub weight: i32,
    pub reps: i32,
    pub updated_at: NaiveDateTime,
}

impl From<SetRow> for Set {
    fn from(row: SetRow) -> Self {
        Set {
            id: Some(row.id),
            exercise_id: Some(row.exercise_id),
            weight: row.weight,
            reps: row.reps,
            updated_at: Some(row.updated_at),
        }
    }
}

/// Rows removed by a workout delete, including everything cascaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedRows {
    pub workouts: usize,
    pub exercises: usize,
    pub sets: usize,
}

impl DeletedRows {
    pub fn total(&self) -> usize {
        self.workouts + self.exercises + self.sets
    }
}
