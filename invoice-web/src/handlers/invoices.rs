use crate::dtos::{CreateInvoiceForm, CreatePageParams};
use crate::flash::{self, Flash, FlashLevel};
use crate::handlers::settings::logo_url;
use crate::models::{CreateInvoice, STATUS_PAID, STATUS_UNPAID};
use crate::money::{format_plain, format_rupiah};
use crate::services::metrics::{record_invoice_created, record_validation_failure};
use crate::services::totals;
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::Form;
use chrono::Local;
use service_core::error::AppError;
use tower_sessions::Session;
use tracing::{info, instrument, warn};
use validator::Validate;

#[derive(Template)]
#[template(path = "create_invoice.html")]
pub struct CreateInvoiceTemplate {
    pub flashes: Vec<Flash>,
    pub current_page: &'static str,
    pub rows: Vec<usize>,
    pub more_rows: usize,
    pub statuses: [&'static str; 2],
}

pub async fn create_invoice_page(
    session: Session,
    Query(params): Query<CreatePageParams>,
) -> Result<impl IntoResponse, AppError> {
    let row_count = params.row_count();

    Ok(CreateInvoiceTemplate {
        flashes: flash::take(&session).await?,
        current_page: "create",
        rows: (1..=row_count).collect(),
        more_rows: CreatePageParams {
            rows: Some(row_count + 5),
        }
        .row_count(),
        statuses: [STATUS_UNPAID, STATUS_PAID],
    })
}

async fn reject(
    session: &Session,
    reason: &'static str,
    messages: Vec<String>,
) -> Result<Redirect, AppError> {
    record_validation_failure(reason);
    for message in messages {
        flash::push(session, FlashLevel::Error, message).await?;
    }
    Ok(Redirect::to("/create"))
}

#[instrument(skip_all)]
pub async fn create_invoice(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CreateInvoiceForm>,
) -> Result<Redirect, AppError> {
    if let Err(errors) = form.validate() {
        return reject(
            &session,
            "missing_field",
            CreateInvoiceForm::validation_messages(&errors),
        )
        .await;
    }

    let computed = match totals::compute(&form.line_items(), &form.discount) {
        Ok(computed) => computed,
        Err(e) => {
            info!(error = %e, "Invoice submission rejected");
            return reject(&session, e.reason(), vec![e.to_string()]).await;
        }
    };

    let now = Local::now();
    let invoice = state
        .db
        .create_invoice(
            &CreateInvoice {
                customer_name: form.customer_name.trim().to_string(),
                status: form.status.trim().to_string(),
                date: now.date_naive(),
                discount: computed.discount,
                total: computed.total,
                items: computed.items,
            },
            now,
        )
        .await?;

    record_invoice_created(&invoice.status, invoice.total);

    flash::push(&session, FlashLevel::Success, "Invoice baru berhasil dibuat!").await?;
    Ok(Redirect::to("/"))
}

pub struct ItemRow {
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub line_total: String,
}

pub struct CompanyHeader {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub logo_url: Option<String>,
}

#[derive(Template)]
#[template(path = "view_invoice.html")]
pub struct ViewInvoiceTemplate {
    pub flashes: Vec<Flash>,
    pub current_page: &'static str,
    pub company: Option<CompanyHeader>,
    pub invoice_number: String,
    pub customer_name: String,
    pub date: String,
    pub status: String,
    pub paid: bool,
    pub items: Vec<ItemRow>,
    pub subtotal: String,
    pub discount: Option<String>,
    pub total: String,
    pub total_plain: String,
    /// Stored total disagrees with the one recomputed from the items.
    pub drift: bool,
}

#[instrument(skip(state, session))]
pub async fn view_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound(anyhow::anyhow!("Invoice {} not found", id));

    let invoice_id: i64 = id.parse().map_err(|_| not_found())?;
    let invoice = state
        .db
        .get_invoice(invoice_id)
        .await?
        .ok_or_else(not_found)?;
    let items = state.db.get_invoice_items(invoice_id).await?;
    let settings = state.db.get_settings().await?;

    // The stored total stays authoritative; the recomputed one only flags drift.
    let subtotal = totals::subtotal_of(items.iter().map(|item| item.line_total()))
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Items of invoice {} sum past the decimal range",
                invoice.id
            ))
        })?;
    let recomputed = totals::total_after_discount(subtotal, invoice.discount);
    let drift = recomputed != Some(invoice.total);
    if drift {
        warn!(
            invoice_id = invoice.id,
            stored_total = %invoice.total,
            recomputed_total = ?recomputed,
            "Stored invoice total differs from its items"
        );
    }

    let company = settings.map(|s| CompanyHeader {
        logo_url: logo_url(&s),
        name: s.name,
        address: s.address,
        phone: s.phone,
    });

    Ok(ViewInvoiceTemplate {
        flashes: flash::take(&session).await?,
        current_page: "invoice",
        company,
        paid: invoice.is_paid(),
        invoice_number: invoice.invoice_number,
        customer_name: invoice.customer_name,
        date: invoice.date.format("%Y-%m-%d").to_string(),
        status: invoice.status,
        items: items
            .iter()
            .map(|item| ItemRow {
                description: item.description.clone(),
                quantity: item.quantity.normalize().to_string(),
                price: format_rupiah(item.price),
                line_total: format_rupiah(item.line_total()),
            })
            .collect(),
        subtotal: format_rupiah(subtotal),
        discount: invoice.discount.map(format_rupiah),
        total: format_rupiah(invoice.total),
        total_plain: format_plain(invoice.total),
        drift,
    })
}
