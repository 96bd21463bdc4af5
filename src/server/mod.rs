//! HTTP service mode.
//!
//! This module provides:
//! - The axum router and handlers (`routes`)
//! - JSON error responses (`error`)
//! - Configuration and secrets loading (`config`)

pub mod config;
pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
