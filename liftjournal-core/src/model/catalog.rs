use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LiftError;

/// The fixed catalog of movements an exercise can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExerciseName {
    Squat,
    Deadlift,
    Bench,
}

impl ExerciseName {
    pub const ALL: [ExerciseName; 3] = [
        ExerciseName::Squat,
        ExerciseName::Deadlift,
        ExerciseName::Bench,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ExerciseName::Squat => "Squat",
            ExerciseName::Deadlift => "Deadlift",
            ExerciseName::Bench => "Bench",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|name| name.as_str()).collect()
    }

    pub(crate) fn catalog_list() -> String {
        Self::names().join(", ")
    }
}

impl FromStr for ExerciseName {
    type Err = LiftError;

    // Exact match only: "squat" is not in the catalog.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| LiftError::InvalidExerciseName {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for ExerciseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
