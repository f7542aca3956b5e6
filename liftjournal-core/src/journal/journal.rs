use serde::Serialize;

use crate::config::Config;
use crate::db::Store;
use crate::error::Result;
use crate::model::{ExerciseName, Workout};

#[derive(Clone)]
pub struct Journal {
    pub(crate) store: Store,
}

/// The re-rendered workout after an append, plus the id of the new row.
#[derive(Debug, Clone, Serialize)]
pub struct Recorded {
    pub id: i32,
    pub workout: Workout,
}

impl Journal {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Store::open(config)?))
    }

    /// Names a new exercise can be given.
    pub fn catalog(&self) -> &'static [ExerciseName] {
        &ExerciseName::ALL
    }
}
