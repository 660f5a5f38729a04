//! Application state for assist service.

use anyhow::Context;
use common::config::AppConfig;
use tracing::warn;

/// Optional database collaborator, classified once at startup.
///
/// The diagnostic endpoint reports each variant as a distinct status
/// instead of parsing error strings at request time.
#[derive(Clone)]
pub enum DatabaseHandle {
    /// `DATABASE_URL` is not configured.
    Absent,
    /// Configured, but the client could not be built.
    Uninitialized,
    /// Usable handle.
    Ready(mongodb::Database),
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub database: DatabaseHandle,
}

impl AppState {
    /// Creates a new application state, acquiring the optional database
    /// handle once.
    ///
    /// Never fails: a bad connection string degrades the handle to
    /// `Uninitialized` so the diagnostic endpoint can report it.
    pub async fn new(config: AppConfig) -> Self {
        let database = match &config.database_url {
            None => DatabaseHandle::Absent,
            Some(url) => match connect(url, config.database_name.as_deref()).await {
                Ok(db) => DatabaseHandle::Ready(db),
                Err(e) => {
                    warn!(error = %e, "database handle unavailable, diagnostics will report it");
                    DatabaseHandle::Uninitialized
                }
            },
        };

        Self { config, database }
    }
}

async fn connect(url: &str, name: Option<&str>) -> anyhow::Result<mongodb::Database> {
    let client = mongodb::Client::with_uri_str(url)
        .await
        .context("failed to build MongoDB client")?;

    let database = match name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .context("DATABASE_NAME not set and the connection string names no database")?,
    };

    Ok(database)
}
