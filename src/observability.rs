//! Observability module for logging and metrics setup.
//!
//! This module provides:
//! - Structured logging with configurable level and format
//! - Prometheus metrics recorder installation
//! - Recording functions for analyses and reference table loads

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

/// Initialize structured logging with tracing and configuration
///
/// Logs go to stderr so report output on stdout stays machine-readable.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("food_additives={}", config.log_level.to_lowercase()).parse()?);

    if config.use_json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .try_init()?;
    }

    tracing::debug!(
        environment = %config.environment,
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Install the Prometheus recorder when metrics are enabled
///
/// Returns the handle used to render collected metrics, or `None` when disabled.
pub fn init_metrics_with_config(config: &ObservabilityConfig) -> Result<Option<PrometheusHandle>> {
    if !config.enable_metrics {
        tracing::debug!("Metrics collection disabled");
        return Ok(None);
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::debug!("Metrics collection initialized");
    Ok(Some(handle))
}

/// Initialize logging and metrics together
pub fn init_observability_with_config(
    config: &ObservabilityConfig,
) -> Result<Option<PrometheusHandle>> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    init_tracing_with_config(config)?;
    init_metrics_with_config(config)
}

/// Record metrics for one ingredient analysis
pub fn record_analysis_metrics(
    outcome: &'static str,
    tokens: usize,
    additives_found: usize,
    duration: std::time::Duration,
) {
    metrics::counter!("additive_analyses_total", "outcome" => outcome).increment(1);
    metrics::histogram!("additive_analysis_duration_seconds").record(duration.as_secs_f64());
    metrics::histogram!("additive_analysis_tokens").record(tokens as f64);
    metrics::histogram!("additive_analysis_matches").record(additives_found as f64);
}

/// Record metrics for one reference table load
pub fn record_table_load_metrics(
    source: &'static str,
    success: bool,
    additives: usize,
    duration: std::time::Duration,
) {
    metrics::counter!(
        "reference_table_loads_total",
        "source" => source,
        "result" => if success { "success" } else { "failure" }
    )
    .increment(1);
    metrics::histogram!("reference_table_load_duration_seconds").record(duration.as_secs_f64());
    if success {
        metrics::gauge!("reference_table_additives").set(additives as f64);
    }
}
