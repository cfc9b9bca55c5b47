//! Domain models for invoice-web.

mod invoice;
mod line_item;
mod settings;

pub use invoice::{CreateInvoice, Invoice, STATUS_PAID, STATUS_UNPAID};
pub use line_item::{CreateInvoiceItem, InvoiceItem};
pub use settings::{CompanySettings, UpsertSettings};

use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};
use std::str::FromStr;

/// Decode a decimal stored as TEXT.
fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_decimal(column, &raw)
}

fn optional_decimal_column(row: &SqliteRow, column: &str) -> Result<Option<Decimal>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| parse_decimal(column, &value)).transpose()
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
