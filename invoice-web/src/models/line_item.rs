//! Invoice line item model for invoice-web.

use super::decimal_column;
use crate::money;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};

/// Line item on an invoice. Immutable once written.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub sort_order: i64,
}

impl InvoiceItem {
    pub fn line_total(&self) -> Decimal {
        money::line_total(self.quantity, self.price)
    }
}

impl<'r> FromRow<'r, SqliteRow> for InvoiceItem {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            invoice_id: row.try_get("invoice_id")?,
            description: row.try_get("description")?,
            quantity: decimal_column(row, "quantity")?,
            price: decimal_column(row, "price")?,
            sort_order: row.try_get("sort_order")?,
        })
    }
}

/// Validated line item ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvoiceItem {
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub line_total: Decimal,
}
