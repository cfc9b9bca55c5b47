//! Human-readable invoice numbers: `INV-<yyyymmddHHMMSS>`.
//!
//! Second granularity collides under bursts, so the store passes the numbers
//! already taken for the same second and [`first_free`] appends `-2`, `-3`, …

use chrono::{DateTime, TimeZone};

pub const PREFIX: &str = "INV-";

/// Base number for an invoice created at `now`.
pub fn generate<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}", PREFIX, now.format("%Y%m%d%H%M%S"))
}

/// First of `base`, `base-2`, `base-3`, … not present in `taken`.
pub fn first_free(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|n| n == base) {
        return base.to_string();
    }
    (2u32..)
        .map(|suffix| format!("{}-{}", base, suffix))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
