//! Invoice total computation.
//!
//! Turns raw form rows into validated line items and a final total. All
//! arithmetic is decimal; every line total and the final total are rounded
//! half-up to two places, while the subtotal is the plain sum of the already
//! rounded line totals.

use crate::models::CreateInvoiceItem;
use crate::money::{line_total, round_money};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Largest accepted magnitude for a quantity, price or discount.
static MAX_AMOUNT: LazyLock<Decimal> = LazyLock::new(|| Decimal::new(1_000_000_000_000, 0));

/// Most rows one invoice may be submitted with. Together with `MAX_AMOUNT`
/// this bounds the subtotal well inside `Decimal`'s range.
pub const MAX_ROWS: usize = 50;

/// One row of the creation form, as submitted.
#[derive(Debug, Clone, Default)]
pub struct RawLineItem {
    pub description: String,
    pub quantity: String,
    pub price: String,
}

impl RawLineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }
}

/// Validated items with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub items: Vec<CreateInvoiceItem>,
    pub subtotal: Decimal,
    /// `None` when the discount field was left blank.
    pub discount: Option<Decimal>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Quantity,
    Price,
    Discount,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Quantity => "Jumlah",
            Field::Price => "Harga",
            Field::Discount => "Diskon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    NotANumber,
    Negative,
    TooLarge,
}

/// A single rejected form value. `row` is 1-based and absent for the discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub row: Option<usize>,
    pub field: Field,
    pub value: String,
    pub problem: Problem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "Baris {}: ", row)?;
        }
        let reason = match self.problem {
            Problem::NotANumber => "bukan angka yang valid",
            Problem::Negative => "tidak boleh negatif",
            Problem::TooLarge => "terlalu besar",
        };
        write!(f, "{} '{}' {}", self.field.label(), self.value, reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    #[error("Invoice harus memiliki minimal satu item yang valid")]
    NoItems,

    #[error("{}", join_errors(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Invoice hanya boleh memiliki maksimal {max} baris, diterima {submitted}")]
    TooManyRows { submitted: usize, max: usize },

    #[error("Total invoice terlalu besar untuk dihitung")]
    Overflow,
}

impl TotalsError {
    /// Short label used for the validation failure metric.
    pub fn reason(&self) -> &'static str {
        match self {
            TotalsError::NoItems => "no_items",
            TotalsError::InvalidFields(_) => "invalid_number",
            TotalsError::TooManyRows { .. } => "too_many_rows",
            TotalsError::Overflow => "overflow",
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_amount(raw: &str, row: Option<usize>, field: Field) -> Result<Decimal, FieldError> {
    let trimmed = raw.trim();
    let error = |problem| FieldError {
        row,
        field,
        value: trimmed.to_string(),
        problem,
    };

    let value = Decimal::from_str(trimmed).map_err(|_| error(Problem::NotANumber))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error(Problem::Negative));
    }
    if value > *MAX_AMOUNT {
        return Err(error(Problem::TooLarge));
    }
    Ok(value)
}

/// Validate the form rows and discount, then compute line totals, subtotal
/// and total.
///
/// Rows with a blank description are skipped. Every other row must carry a
/// valid quantity and price; all invalid values are reported together rather
/// than dropped. A blank discount means "no discount". More than `MAX_ROWS`
/// submitted rows, blank ones included, reject the whole submission.
pub fn compute(rows: &[RawLineItem], raw_discount: &str) -> Result<InvoiceTotals, TotalsError> {
    if rows.len() > MAX_ROWS {
        return Err(TotalsError::TooManyRows {
            submitted: rows.len(),
            max: MAX_ROWS,
        });
    }

    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let description = row.description.trim();
        if description.is_empty() {
            continue;
        }
        let row_number = Some(index + 1);

        let quantity = parse_amount(&row.quantity, row_number, Field::Quantity);
        let price = parse_amount(&row.price, row_number, Field::Price);

        match (quantity, price) {
            (Ok(quantity), Ok(price)) => items.push(CreateInvoiceItem {
                description: description.to_string(),
                quantity,
                price,
                line_total: line_total(quantity, price),
            }),
            (quantity, price) => {
                errors.extend(quantity.err());
                errors.extend(price.err());
            }
        }
    }

    let discount = if raw_discount.trim().is_empty() {
        None
    } else {
        match parse_amount(raw_discount, None, Field::Discount) {
            Ok(value) => Some(round_money(value)),
            Err(e) => {
                errors.push(e);
                None
            }
        }
    };

    if !errors.is_empty() {
        return Err(TotalsError::InvalidFields(errors));
    }
    if items.is_empty() {
        return Err(TotalsError::NoItems);
    }

    let subtotal =
        subtotal_of(items.iter().map(|item| item.line_total)).ok_or(TotalsError::Overflow)?;
    let total = total_after_discount(subtotal, discount).ok_or(TotalsError::Overflow)?;

    Ok(InvoiceTotals {
        items,
        subtotal,
        discount,
        total,
    })
}

/// Running sum of already rounded line totals. `None` when the sum leaves
/// `Decimal`'s range.
pub fn subtotal_of(line_totals: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    line_totals
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line))
}

/// `round(subtotal − discount)`, with an absent discount treated as zero.
pub fn total_after_discount(subtotal: Decimal, discount: Option<Decimal>) -> Option<Decimal> {
    subtotal
        .checked_sub(discount.unwrap_or(Decimal::ZERO))
        .map(round_money)
}
