use crate::services::totals::{RawLineItem, MAX_ROWS};
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Blank rows rendered on the creation form unless `?rows=` asks for more.
pub const DEFAULT_FORM_ROWS: usize = 5;
pub const MAX_FORM_ROWS: usize = MAX_ROWS;

/// `POST /create` body. Item columns arrive as repeated keys, one per row.
/// Any client-side `total` field is ignored; the server computes it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInvoiceForm {
    #[serde(default)]
    #[validate(custom(function = "customer_name_present"))]
    pub customer_name: String,

    #[serde(default)]
    #[validate(custom(function = "status_present"))]
    pub status: String,

    #[serde(default)]
    pub discount: String,

    #[serde(default)]
    pub description: Vec<String>,

    #[serde(default)]
    pub quantity: Vec<String>,

    #[serde(default)]
    pub price: Vec<String>,
}

impl CreateInvoiceForm {
    /// Zip the item columns into rows. A column shorter than the others is
    /// padded with empty values.
    pub fn line_items(&self) -> Vec<RawLineItem> {
        let rows = self
            .description
            .len()
            .max(self.quantity.len())
            .max(self.price.len());
        let cell = |column: &[String], i: usize| column.get(i).cloned().unwrap_or_default();

        (0..rows)
            .map(|i| RawLineItem {
                description: cell(&self.description, i),
                quantity: cell(&self.quantity, i),
                price: cell(&self.price, i),
            })
            .collect()
    }

    /// Messages of every failed field check, in a stable order.
    pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect()
    }
}

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed(message));
        return Err(error);
    }
    Ok(())
}

fn customer_name_present(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Nama pelanggan wajib diisi")
}

fn status_present(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Status wajib diisi")
}

/// `GET /create?rows=N`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePageParams {
    pub rows: Option<usize>,
}

impl CreatePageParams {
    pub fn row_count(&self) -> usize {
        self.rows
            .unwrap_or(DEFAULT_FORM_ROWS)
            .clamp(1, MAX_FORM_ROWS)
    }
}
