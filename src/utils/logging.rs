//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GroupWarden application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::{GroupWardenError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the process exits.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "groupwarden.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| GroupWardenError::Config(format!("Failed to install logger: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log moderation actions taken on behalf of an admin
pub fn log_admin_action(admin: &str, action: &str, target: Option<&str>, group_id: &str) {
    warn!(
        admin = admin,
        action = action,
        target = target,
        group_id = group_id,
        "Admin action performed"
    );
}

/// Log group events
pub fn log_group_event(group_id: &str, event: &str, details: Option<&str>) {
    info!(
        group_id = group_id,
        event = event,
        details = details,
        "Group event occurred"
    );
}

/// Log a failed dashboard synchronisation attempt
pub fn log_sync_failure(operation: &str, error: &str) {
    warn!(
        operation = operation,
        error = error,
        "Dashboard sync failed, continuing without dashboard"
    );
}

/// Log transport errors with context
pub fn log_transport_error(operation: &str, error: &str, context: Option<&str>) {
    error!(
        operation = operation,
        error = error,
        context = context,
        "Transport error occurred"
    );
}

/// Log an authorization decision
pub fn log_authorization(sender: &str, conversation: Option<&str>, granted_by: Option<&str>) {
    debug!(
        sender = sender,
        conversation = conversation,
        granted_by = granted_by,
        authorized = granted_by.is_some(),
        "Authorization resolved"
    );
}
