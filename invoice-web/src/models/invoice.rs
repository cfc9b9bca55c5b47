//! Invoice model for invoice-web.

use super::{decimal_column, optional_decimal_column, CreateInvoiceItem};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};

/// Status literal counted as settled on the dashboard. Matching is exact.
pub const STATUS_PAID: &str = "LUNAS";
pub const STATUS_UNPAID: &str = "BELUM LUNAS";

/// Invoice header. `total` is authoritative; it was computed from the items
/// when the invoice was written and is never edited afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub customer_name: String,
    pub date: NaiveDate,
    pub discount: Option<Decimal>,
    pub total: Decimal,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == STATUS_PAID
    }
}

impl<'r> FromRow<'r, SqliteRow> for Invoice {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            invoice_number: row.try_get("invoice_number")?,
            customer_name: row.try_get("customer_name")?,
            date: row.try_get("date")?,
            discount: optional_decimal_column(row, "discount")?,
            total: decimal_column(row, "total")?,
            status: row.try_get("status")?,
            created_utc: row.try_get("created_utc")?,
        })
    }
}

/// Input for creating an invoice together with its items.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub customer_name: String,
    pub status: String,
    pub date: NaiveDate,
    pub discount: Option<Decimal>,
    pub total: Decimal,
    pub items: Vec<CreateInvoiceItem>,
}
