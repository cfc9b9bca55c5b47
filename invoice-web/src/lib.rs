//! invoice-web: company settings, invoices with line items and decimal
//! totals, served as server-rendered pages.
pub mod config;
pub mod dtos;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod money;
pub mod services;
pub mod startup;
