//! Service catalog library crate.
//!
//! The binary and the integration tests in `tests/` both drive the handler
//! through these modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;
