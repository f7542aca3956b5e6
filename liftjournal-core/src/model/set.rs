use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{LiftError, Result};

/// One performance of an exercise: `weight` for `reps` repetitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Set {
    pub(crate) id: Option<i32>,
    pub(crate) exercise_id: Option<i32>,
    pub(crate) weight: i32,
    pub(crate) reps: i32,
    pub(crate) updated_at: Option<NaiveDateTime>,
}

impl Set {
    pub(crate) fn new(weight: i32, reps: i32) -> Result<Self> {
        if weight < 0 {
            return Err(LiftError::InvalidSetValue {
                field: "weight",
                value: weight,
            });
        }
        if reps < 0 {
            return Err(LiftError::InvalidSetValue {
                field: "reps",
                value: reps,
            });
        }
        Ok(Self {
            id: None,
            exercise_id: None,
            weight,
            reps,
            updated_at: None,
        })
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn exercise_id(&self) -> Option<i32> {
        self.exercise_id
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn reps(&self) -> i32 {
        self.reps
    }

    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        self.updated_at
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.weight, self.reps)
    }
}
