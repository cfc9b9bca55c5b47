//! One-shot notices carried across a redirect in the session.

use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use tower_sessions::Session;

const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// CSS class used by the templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a notice for the next rendered page.
pub async fn push(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), AppError> {
    let mut pending = session
        .get::<Vec<Flash>>(FLASH_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or_default();
    pending.push(Flash {
        level,
        message: message.into(),
    });
    session
        .insert(FLASH_KEY, pending)
        .await
        .map_err(session_error)
}

/// Remove and return every queued notice.
pub async fn take(session: &Session) -> Result<Vec<Flash>, AppError> {
    Ok(session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or_default())
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::InternalError(anyhow::anyhow!("Session error: {}", e))
}
