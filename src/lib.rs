//! GroupWarden WhatsApp moderation bot
//!
//! A group-moderation bot for WhatsApp with a companion web dashboard.
//! This library provides the admin resolution, command dispatch, moderation
//! and welcome logic, the chat transport seam, and the dashboard API used by
//! both binaries.

pub mod bot;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod services;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GroupWardenError, Result};

// Re-export main components for easy access
pub use bot::BotRuntime;
pub use dashboard::DashboardState;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
