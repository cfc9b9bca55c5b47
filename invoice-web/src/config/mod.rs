use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded files; served under `/uploads`.
    pub upload_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl InvoiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(InvoiceConfig {
            common: common_config,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", Some("sqlite://invoices.db"), is_prod)?,
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("5"), false)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "DATABASE_MAX_CONNECTIONS is not a number: {}",
                            e
                        ))
                    })?,
            },
            storage: StorageConfig {
                upload_dir: get_env("UPLOAD_DIR", Some("static/uploads"), is_prod)?,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    lookup(key, env::var(key).ok(), default, is_prod)
}

fn lookup(
    key: &str,
    value: Option<String>,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError> {
    match value {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_wins() {
        let value = lookup("UPLOAD_DIR", Some("/srv/up".into()), Some("static/uploads"), true);
        assert_eq!(value.unwrap(), "/srv/up");
    }

    #[test]
    fn default_applies_outside_production() {
        let value = lookup("UPLOAD_DIR", None, Some("static/uploads"), false);
        assert_eq!(value.unwrap(), "static/uploads");
    }

    #[test]
    fn production_requires_explicit_value() {
        let value = lookup("DATABASE_URL", None, Some("sqlite://invoices.db"), true);
        assert!(matches!(value, Err(AppError::ConfigError(_))));
    }
}
