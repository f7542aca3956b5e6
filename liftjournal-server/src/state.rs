use liftjournal::Journal;

use crate::error::ApiError;

/// Shared application state: the journal handle built at startup.
#[derive(Clone)]
pub struct AppState {
    journal: Journal,
}

impl AppState {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    /// Runs a journal operation on the blocking pool; SQLite calls never
    /// execute on the async workers.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Journal) -> liftjournal::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let journal = self.journal.clone();
        tokio::task::spawn_blocking(move || op(&journal))
            .await
            .map_err(ApiError::internal)?
            .map_err(ApiError::from)
    }
}
