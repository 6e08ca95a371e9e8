//! Bot handlers module
//!
//! This module contains all chat handlers organized by type:
//! - Command handlers for prefixed chat commands
//! - Message handlers for incoming messages and membership changes

pub mod commands;
pub mod messages;
pub mod texts;

// Re-export commonly used handler functions
pub use commands::{dispatch, BuiltinCommand, DispatchOutcome, IgnoreReason};
pub use messages::{handle_message, handle_participants_update, MembershipOutcome};
