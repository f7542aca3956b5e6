use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{Exercise, ExerciseName};
use crate::error::Result;

/// A training session. Owns its exercises exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workout {
    pub(crate) id: Option<i32>,
    pub(crate) date: NaiveDate,
    pub(crate) updated_at: Option<NaiveDateTime>,
    pub(crate) version: i32,
    pub(crate) exercises: Vec<Exercise>,
    #[serde(skip)]
    pub(crate) dirty: bool,
}

impl Workout {
    /// An empty workout dated today.
    pub fn new() -> Self {
        Self::new_on(Local::now().date_naive())
    }

    pub fn new_on(date: NaiveDate) -> Self {
        Self {
            id: None,
            date,
            updated_at: None,
            version: 0,
            exercises: Vec::new(),
            dirty: false,
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        self.updated_at
    }

    /// Row version this copy was loaded or saved at; 0 before the first save.
    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn exercise(&self, exercise_id: i32) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == Some(exercise_id))
    }

    pub fn exercise_mut(&mut self, exercise_id: i32) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == Some(exercise_id))
    }

    /// Appends an empty exercise after checking `name` against the catalog.
    pub fn add_exercise(&mut self, name: &str) -> Result<&mut Exercise> {
        let name = name.parse::<ExerciseName>()?;
        Ok(self.push_exercise(name))
    }

    pub fn push_exercise(&mut self, name: ExerciseName) -> &mut Exercise {
        self.exercises.push(Exercise::new(name));
        self.dirty = true;
        let last = self.exercises.len() - 1;
        &mut self.exercises[last]
    }

    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub(crate) fn has_changes(&self) -> bool {
        self.id.is_none() || self.dirty || self.exercises.iter().any(Exercise::has_changes)
    }
}

impl Default for Workout {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Workout #{} ({})", id, self.date),
            None => write!(f, "Unsaved workout ({})", self.date),
        }
    }
}

/// A workout row without its children, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSummary {
    pub id: i32,
    pub date: NaiveDate,
    pub updated_at: NaiveDateTime,
    pub exercise_count: i64,
}

impl fmt::Display for WorkoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.exercise_count == 1 { "" } else { "s" };
        write!(
            f,
            "{}, {}, {} exercise{}",
            self.id, self.date, self.exercise_count, plural
        )
    }
}
