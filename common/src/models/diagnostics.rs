//! Diagnostic probe models.

use serde::Serialize;
use utoipa::ToSchema;

/// Snapshot of backend and database health returned by the diagnostic
/// endpoint.
///
/// Every status field is a human-readable string rather than a machine
/// code; clients render them directly. The shape is kept as-is for
/// compatibility with existing frontend code.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiagnosticReport {
    /// Backend process status.
    pub backend: String,

    /// Database availability, from "not available" through "connected and
    /// working", including degraded states.
    pub database: String,

    /// Whether `DATABASE_URL` is set (presence only, never the value).
    pub database_url: String,

    /// Whether `DATABASE_NAME` is set (presence only, never the value).
    pub database_name: String,

    /// Connection state, "Connected" or "Not Connected".
    pub connection_status: String,

    /// Collection names seen through the database handle, capped at 10
    /// entries in whatever order the database returns them.
    pub collections: Vec<String>,
}

impl DiagnosticReport {
    /// Pessimistic starting point: backend up, database unreachable.
    ///
    /// The probe upgrades individual fields as each check succeeds, so a
    /// failure anywhere leaves the matching field at its default.
    pub fn unavailable() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: "❌ Not Set".to_string(),
            database_name: "❌ Not Set".to_string(),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}
