//! service-core: Shared web infrastructure for invoice-web.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
