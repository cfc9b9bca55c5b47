//! Form payloads accepted by the page handlers.

pub mod invoices;
pub mod settings;

pub use invoices::{CreateInvoiceForm, CreatePageParams};
pub use settings::SettingsForm;
