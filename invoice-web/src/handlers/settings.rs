use crate::dtos::settings::{SettingsForm, MAX_LOGO_BYTES};
use crate::flash::{self, Flash, FlashLevel};
use crate::models::{CompanySettings, UpsertSettings};
use crate::services::metrics::record_validation_failure;
use crate::services::LOGO_KEY;
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect},
};
use service_core::error::AppError;
use tower_sessions::Session;
use tracing::{info, instrument};

/// Public URL of a stored logo. The timestamp defeats browser caching since
/// every upload reuses the same file name.
pub fn logo_url(settings: &CompanySettings) -> Option<String> {
    settings.logo_path.as_ref().map(|path| {
        format!(
            "/uploads/{}?v={}",
            path,
            settings.updated_utc.timestamp()
        )
    })
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub flashes: Vec<Flash>,
    pub current_page: &'static str,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub logo_url: Option<String>,
}

pub async fn settings_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.db.get_settings().await?;
    let logo_url = settings.as_ref().and_then(logo_url);
    let settings = settings.map(|s| (s.name, s.address, s.phone));
    let (name, address, phone) = settings.unwrap_or_default();

    Ok(SettingsTemplate {
        flashes: flash::take(&session).await?,
        current_page: "settings",
        name,
        address,
        phone,
        logo_url,
    })
}

#[instrument(skip_all)]
pub async fn save_settings(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = SettingsForm::from_multipart(multipart).await?;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        record_validation_failure("missing_settings_field");
        flash::push(
            &session,
            FlashLevel::Error,
            format!("Kolom wajib belum diisi: {}", missing.join(", ")),
        )
        .await?;
        return Ok(Redirect::to("/settings"));
    }

    let logo_path = match form.logo {
        Some(logo) if logo.data.len() > MAX_LOGO_BYTES => {
            record_validation_failure("logo_too_large");
            flash::push(
                &session,
                FlashLevel::Error,
                format!("Logo terlalu besar (maks {} MB)", MAX_LOGO_BYTES / (1024 * 1024)),
            )
            .await?;
            return Ok(Redirect::to("/settings"));
        }
        Some(logo) => {
            let size = logo.data.len();
            state.storage.upload(LOGO_KEY, logo.data).await.map_err(|e| {
                tracing::error!("Failed to store logo {}: {}", logo.file_name, e);
                e
            })?;
            info!(file_name = %logo.file_name, size = size, "Logo uploaded");
            Some(LOGO_KEY.to_string())
        }
        None => None,
    };

    state
        .db
        .upsert_settings(&UpsertSettings {
            name: form.name.unwrap_or_default(),
            address: form.address.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            logo_path,
        })
        .await?;

    flash::push(&session, FlashLevel::Success, "Pengaturan perusahaan disimpan!").await?;
    Ok(Redirect::to("/settings"))
}
