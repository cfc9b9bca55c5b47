//! Dashboard aggregates.

use crate::models::Invoice;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_invoice: usize,
    /// Sum of every invoice total.
    pub total_nominal: Decimal,
    /// Sum of totals whose status is exactly `LUNAS`.
    pub total_lunas: Decimal,
}

impl DashboardSummary {
    /// `None` when a sum leaves `Decimal`'s range.
    pub fn from_invoices(invoices: &[Invoice]) -> Option<Self> {
        invoices
            .iter()
            .try_fold(Self::default(), |mut summary, invoice| {
                summary.total_invoice += 1;
                summary.total_nominal = summary.total_nominal.checked_add(invoice.total)?;
                if invoice.is_paid() {
                    summary.total_lunas = summary.total_lunas.checked_add(invoice.total)?;
                }
                Some(summary)
            })
    }
}
