//! Company settings model for invoice-web.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// The company profile printed on every invoice. Exactly one row may exist.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanySettings {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Path relative to the upload directory.
    pub logo_path: Option<String>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for the settings upsert. `logo_path: None` keeps the stored logo.
#[derive(Debug, Clone, Default)]
pub struct UpsertSettings {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub logo_path: Option<String>,
}
