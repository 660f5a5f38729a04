//! Application configuration.
//!
//! Populated once at process start from environment variables, with
//! explicit defaults. Handlers read configuration through `AppState`
//! instead of doing ad hoc environment lookups.

use std::env;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Listen port (`PORT`, default 8000).
    pub port: u16,
    /// Database connection string (`DATABASE_URL`), if configured.
    pub database_url: Option<String>,
    /// Database name (`DATABASE_NAME`), if configured.
    pub database_name: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: parse_port(env::var("PORT").ok()),
            database_url: non_empty(env::var("DATABASE_URL").ok()),
            database_name: non_empty(env::var("DATABASE_NAME").ok()),
        }
    }

    /// Whether `DATABASE_URL` was set.
    pub fn database_url_set(&self) -> bool {
        self.database_url.is_some()
    }

    /// Whether `DATABASE_NAME` was set.
    pub fn database_name_set(&self) -> bool {
        self.database_name.is_some()
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT)
}

/// Empty values count as unset.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}
