//! Services module for invoice-web.

pub mod database;
pub mod invoice_number;
pub mod metrics;
pub mod storage;
pub mod summary;
pub mod totals;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use storage::{LocalStorage, Storage, LOGO_KEY};
pub use summary::DashboardSummary;
