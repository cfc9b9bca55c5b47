//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use service_core::error::AppError;
use std::sync::OnceLock;
use std::time::Instant;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup before any metric is
/// recorded; a second call is a no-op.
pub fn init_metrics() -> Result<(), AppError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "Failed to install Prometheus recorder: {}",
            e
        ))
    })?;
    let _ = METRICS_HANDLE.set(handle);

    Ok(())
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Times one store operation into `invoice_web_db_query_duration_seconds`.
pub struct QueryTimer {
    operation: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    pub fn observe_duration(self) {
        histogram!("invoice_web_db_query_duration_seconds", "operation" => self.operation)
            .record(self.start.elapsed().as_secs_f64());
    }
}

pub fn record_invoice_created(status: &str, total: Decimal) {
    counter!("invoice_web_invoices_total", "status" => status.to_string()).increment(1);
    histogram!("invoice_web_invoice_amount").record(total.to_f64().unwrap_or_default());
}

pub fn record_validation_failure(reason: &'static str) {
    counter!("invoice_web_validation_failures_total", "reason" => reason).increment(1);
}
