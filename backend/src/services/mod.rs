//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the shared scoring core.

pub mod barrier;
pub mod export;
pub mod health_indicator;
pub mod participant;
pub mod questionnaire;
pub mod statistics;
pub mod strategy;

pub use barrier::BarrierService;
pub use export::ExportService;
pub use health_indicator::HealthIndicatorService;
pub use participant::ParticipantService;
pub use questionnaire::QuestionnaireService;
pub use statistics::StatisticsService;
pub use strategy::StrategyService;

use crate::error::ApiError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Convert a NUMERIC column value to f64
pub(crate) fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Parse a choice column back into its enum
///
/// A failure means the row violates the schema's CHECK constraints.
pub(crate) fn parse_stored<T>(column: &str, value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Corrupt {} column: {}", column, e)))
}

/// Parse a path identifier
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid {} id", resource)))
}
