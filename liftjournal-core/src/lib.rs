pub mod config;
pub mod db;
pub mod error;
pub mod journal;
pub mod logging;
pub mod model;

pub use config::Config;
pub use db::Store;
pub use error::{Entity, LiftError, Result};
pub use journal::Journal;
