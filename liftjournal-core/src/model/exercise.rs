use chrono::NaiveDateTime;
use serde::Serialize;

use super::{ExerciseName, Set};
use crate::error::Result;

/// A named movement inside a workout, owning its sets in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub(crate) id: Option<i32>,
    pub(crate) workout_id: Option<i32>,
    pub(crate) name: ExerciseName,
    pub(crate) updated_at: Option<NaiveDateTime>,
    pub(crate) sets: Vec<Set>,
    #[serde(skip)]
    pub(crate) dirty: bool,
}

impl Exercise {
    pub(crate) fn new(name: ExerciseName) -> Self {
        Self {
            id: None,
            workout_id: None,
            name,
            updated_at: None,
            sets: Vec::new(),
            dirty: false,
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn workout_id(&self) -> Option<i32> {
        self.workout_id
    }

    pub fn name(&self) -> ExerciseName {
        self.name
    }

    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        self.updated_at
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// Appends a new set. Fails with `InvalidSetValue` on a negative weight or rep count.
    pub fn add_set(&mut self, weight: i32, reps: i32) -> Result<&mut Set> {
        let set = Set::new(weight, reps)?;
        self.sets.push(set);
        self.dirty = true;
        let last = self.sets.len() - 1;
        Ok(&mut self.sets[last])
    }

    pub(crate) fn has_changes(&self) -> bool {
        self.id.is_none() || self.dirty || self.sets.iter().any(|s| s.id.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiftError;

    #[test]
    fn each_add_set_appends_one() {
        let mut exercise = Exercise::new(ExerciseName::Squat);
        for expected in 1..=3 {
            exercise.add_set(135, 5).unwrap();
            assert_eq!(exercise.sets().len(), expected);
        }
        assert!(exercise.sets().iter().all(|s| s.to_string() == "135 x 5"));
    }

    #[test]
    fn rejected_set_leaves_list_untouched() {
        let mut exercise = Exercise::new(ExerciseName::Bench);
        exercise.add_set(185, 5).unwrap();
        let err = exercise.add_set(185, -1).unwrap_err();
        assert!(matches!(err, LiftError::InvalidSetValue { field: "reps", .. }));
        assert_eq!(exercise.sets().len(), 1);
    }
}
