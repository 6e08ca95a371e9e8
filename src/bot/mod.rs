//! Bot runtime module

pub mod runtime;

pub use runtime::{BotRuntime, SessionEnd};
