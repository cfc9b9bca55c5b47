//! Monetary arithmetic and display.
//!
//! Every stored amount goes through [`round_money`]: two decimal places,
//! midpoint rounded away from zero. Floats only appear at the metrics boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Round half-up (away from zero) to two decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded `quantity × price` for a single line.
pub fn line_total(quantity: Decimal, price: Decimal) -> Decimal {
    round_money(quantity * price)
}

/// Render an amount as Indonesian rupiah, e.g. `Rp 1.234.567,89`. At least
/// two decimals are shown; finer unit prices keep their extra digits.
pub fn format_rupiah(value: Decimal) -> String {
    let scale = value.normalize().scale().max(MONEY_SCALE) as usize;
    let digits = format!("{:.*}", scale, value.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}Rp {},{}", sign, grouped, fraction)
}

/// Plain two-place rendering used for form values and stored text.
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}
