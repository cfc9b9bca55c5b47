use crate::flash::{self, Flash};
use crate::models::Invoice;
use crate::money::format_rupiah;
use crate::services::DashboardSummary;
use crate::startup::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};
use service_core::error::AppError;
use tower_sessions::Session;

pub struct InvoiceRow {
    pub id: i64,
    pub invoice_number: String,
    pub customer_name: String,
    pub date: String,
    pub total: String,
    pub status: String,
    pub paid: bool,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            customer_name: invoice.customer_name.clone(),
            date: invoice.date.format("%Y-%m-%d").to_string(),
            total: format_rupiah(invoice.total),
            status: invoice.status.clone(),
            paid: invoice.is_paid(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct DashboardTemplate {
    pub flashes: Vec<Flash>,
    pub current_page: &'static str,
    pub invoices: Vec<InvoiceRow>,
    pub total_invoice: usize,
    pub total_nominal: String,
    pub total_lunas: String,
}

pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let invoices = state.db.list_invoices().await?;
    let summary = DashboardSummary::from_invoices(&invoices).ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!(
            "Dashboard totals exceed the decimal range"
        ))
    })?;

    Ok(DashboardTemplate {
        flashes: flash::take(&session).await?,
        current_page: "dashboard",
        invoices: invoices.iter().map(InvoiceRow::from).collect(),
        total_invoice: summary.total_invoice,
        total_nominal: format_rupiah(summary.total_nominal),
        total_lunas: format_rupiah(summary.total_lunas),
    })
}
