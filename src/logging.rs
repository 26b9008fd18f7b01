//! # Structured Logging Module
//!
//! Environment-aware structured logging for resolution runs.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the host. Binaries and hosts without their own subscriber can call
//! [`init_structured_logging`].

use crate::config::ResolverSettings;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging from `CACHE_RULES_*` settings
///
/// Falls back to default settings if the environment cannot be parsed.
pub fn init_structured_logging() {
    let settings = ResolverSettings::from_env().unwrap_or_default();
    init_logging_with(&settings);
}

/// Initialize structured logging for the given settings
///
/// `CACHE_RULES_LOG` overrides the filter; otherwise the level follows
/// `settings.environment`. `CACHE_RULES_LOG_FORMAT=json` switches to JSON
/// output. Safe to call more than once, and never panics if a global
/// subscriber is already installed.
pub fn init_logging_with(settings: &ResolverSettings) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = filter_directive(settings, std::env::var("CACHE_RULES_LOG").ok());
        let json = std::env::var("CACHE_RULES_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let layer = if json {
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .json()
                .with_filter(EnvFilter::new(&filter))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(&filter))
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::debug!(
            environment = %settings.environment,
            filter = %filter,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Filter directive: an explicit override, else the environment's level
fn filter_directive(settings: &ResolverSettings, log_override: Option<String>) -> String {
    log_override
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| get_log_level(&settings.environment).to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for resolution pipeline steps
pub fn log_resolution_operation(operation: &str, component: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        operation = %operation,
        component = %component,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "RESOLUTION_OPERATION"
    );
}

/// Log structured data for registry operations
pub fn log_registry_operation(operation: &str, name: &str, status: &str) {
    tracing::debug!(
        operation = %operation,
        name = %name,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
