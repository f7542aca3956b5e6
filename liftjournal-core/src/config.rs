use std::env;

use log::LevelFilter;

use crate::logging;

pub const DEFAULT_DATABASE_URL: &str = "liftjournal.db";

/// Runtime settings shared by the CLI and the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub log_level: Option<LevelFilter>,
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            log_level: None,
        }
    }

    /// Reads `DATABASE_URL` and `LIFTJOURNAL_LOG`, falling back to defaults.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_level = env::var("LIFTJOURNAL_LOG")
            .ok()
            .and_then(|level| logging::parse_level(&level));

        Self {
            database_url,
            log_level,
        }
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    /// The path handed to SQLite, without any `sqlite://` scheme.
    pub fn database_path(&self) -> &str {
        self.database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))
            .unwrap_or(&self.database_url)
    }

    pub fn is_in_memory(&self) -> bool {
        let path = self.database_path();
        path == ":memory:" || path.contains("mode=memory")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}
