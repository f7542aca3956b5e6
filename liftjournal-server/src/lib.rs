//! HTTP front end for the journal.

mod error;
mod extract;
mod handlers;
mod routes;
mod state;

#[cfg(test)]
mod routes_test;

use std::net::IpAddr;

use log::info;

use liftjournal::Journal;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
        }
    }
}

/// Serves the journal until Ctrl-C. The journal (and its connection pool) is
/// released when this returns.
pub async fn run(config: Config, journal: Journal) -> anyhow::Result<()> {
    let app = create_router(AppState::new(journal));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LiftJournal listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("LiftJournal server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
