pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod settings;

pub use dashboard::dashboard;
pub use health::{health_check, metrics};
pub use invoices::{create_invoice, create_invoice_page, view_invoice};
pub use settings::{save_settings, settings_page};
