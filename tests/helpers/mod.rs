//! Test helpers module
//!
//! This module provides utilities and helpers for testing the GroupWarden
//! application: an in-memory chat transport, canned identities and groups,
//! and a test context wiring the full service graph.

#![allow(dead_code)]

pub mod mock_transport;
pub mod test_context;
pub mod test_data;

pub use mock_transport::*;
pub use test_context::*;
pub use test_data::*;
