use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use thiserror::Error as ThisError;

use crate::model::ExerciseName;

pub type Result<T, E = LiftError> = std::result::Result<T, E>;

/// The kind of row an id failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Workout,
    Exercise,
    Set,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Workout => write!(f, "workout"),
            Entity::Exercise => write!(f, "exercise"),
            Entity::Set => write!(f, "set"),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum LiftError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error(
        "unknown exercise '{name}', expected one of: {}",
        ExerciseName::catalog_list()
    )]
    InvalidExerciseName { name: String },

    #[error("{field} must be a non-negative integer, got {value}")]
    InvalidSetValue { field: &'static str, value: i32 },

    #[error("workout {workout_id} changed since it was loaded (expected version {expected})")]
    Conflict { workout_id: i32, expected: i32 },

    #[error("storage failure: {0}")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

impl LiftError {
    pub fn not_found(entity: Entity, id: i32) -> Self {
        LiftError::NotFound { entity, id }
    }

    pub fn storage<D: fmt::Display>(d: D) -> Self {
        LiftError::Storage(d.to_string().into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LiftError::NotFound { .. })
    }

    /// Bad user input that was rejected before anything was persisted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LiftError::InvalidExerciseName { .. } | LiftError::InvalidSetValue { .. }
        )
    }
}

impl From<diesel::result::Error> for LiftError {
    fn from(e: diesel::result::Error) -> Self {
        LiftError::Storage(Box::new(e))
    }
}

impl From<diesel::r2d2::PoolError> for LiftError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        LiftError::Storage(Box::new(e))
    }
}

impl From<diesel::ConnectionError> for LiftError {
    fn from(e: diesel::ConnectionError) -> Self {
        LiftError::Storage(Box::new(e))
    }
}
