use axum::extract::Multipart;
use service_core::error::AppError;

/// Largest accepted logo.
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// `POST /settings` multipart body.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Present only when a file was actually chosen.
    pub logo: Option<LogoUpload>,
}

impl SettingsForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = SettingsForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
        })? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "logo" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!("Failed to read logo bytes: {}", e))
                    })?;
                    // Browsers submit an empty, unnamed part when no file is chosen.
                    if !file_name.is_empty() && !data.is_empty() {
                        form.logo = Some(LogoUpload {
                            file_name,
                            data: data.to_vec(),
                        });
                    }
                }
                "name" | "address" | "phone" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!("Failed to read field {}: {}", name, e))
                    })?;
                    match name.as_str() {
                        "name" => form.name = Some(value),
                        "address" => form.address = Some(value),
                        _ => form.phone = Some(value),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Names of required fields absent from the submission.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_none()),
            ("address", self.address.is_none()),
            ("phone", self.phone.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_listed_in_form_order() {
        let form = SettingsForm {
            address: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(form.missing_fields(), vec!["name", "phone"]);
    }

    #[test]
    fn empty_strings_count_as_present() {
        let form = SettingsForm {
            name: Some(String::new()),
            address: Some(String::new()),
            phone: Some(String::new()),
            logo: None,
        };
        assert!(form.missing_fields().is_empty());
    }
}
