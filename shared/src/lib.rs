//! Sedentarism Study Shared Library
//!
//! This crate contains the activity and health scoring core, domain models
//! and API types used across the backend and WASM modules.

pub mod health_metrics;
pub mod ipaq;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use health_metrics::*;
pub use ipaq::*;
pub use models::*;
pub use types::*;
