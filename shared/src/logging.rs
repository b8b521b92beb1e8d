//! Shared logging utilities for consistent tracing across components

use crate::types::ServiceId;
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

/// Build the env-filter directive for a component at a base level
pub fn filter_directive(service_id: &ServiceId, base_level: &str) -> String {
    match service_id {
        ServiceId::Registry => format!("registry={base_level},shared={base_level}"),
        ServiceId::WebServer => format!(
            "webserver={base_level},registry={base_level},shared={base_level},\
             tower_http={base_level},axum={base_level}"
        ),
    }
}

/// Initialize tracing subscriber for the current service.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is a
/// no-op so tests can share it.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let base_level = log_level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(ServiceId::current(), base_level)));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for service-aware info logging
#[macro_export]
macro_rules! service_info {
    ($service_id:expr, $($arg:tt)*) => {
        tracing::info!(
            service = %$service_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for service-aware warning logging
#[macro_export]
macro_rules! service_warn {
    ($service_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            service = %$service_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for service-aware error logging
#[macro_export]
macro_rules! service_error {
    ($service_id:expr, $($arg:tt)*) => {
        tracing::error!(
            service = %$service_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for service-aware debug logging
#[macro_export]
macro_rules! service_debug {
    ($service_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            service = %$service_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(service_id: &ServiceId, details: &str) {
    info!(
        service = %service_id,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(service_id: &ServiceId, reason: &str) {
    info!(
        service = %service_id,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(service_id: &ServiceId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        service = %service_id,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for degraded-but-continuing conditions
pub fn log_degraded(service_id: &ServiceId, context: &str, error: &dyn std::fmt::Display) {
    warn!(
        service = %service_id,
        timestamp = format_timestamp(),
        error = %error,
        "⚠️ {} degraded: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(service_id: &ServiceId, message: &str) {
    info!(
        service = %service_id,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}
