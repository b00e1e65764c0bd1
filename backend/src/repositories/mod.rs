//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod barrier;
pub mod health_indicator;
pub mod participant;
pub mod questionnaire;
pub mod statistics;
pub mod strategy;

pub use barrier::{BarrierRecord, BarrierRepository, CreateBarrier};
pub use health_indicator::{HealthIndicatorRecord, HealthIndicatorRepository};
pub use participant::{ParticipantFilter, ParticipantInput, ParticipantRecord, ParticipantRepository};
pub use questionnaire::{QuestionnaireRecord, QuestionnaireRepository};
pub use statistics::{
    BarrierCategoryStats, ExportRow, KeyCount, PrevalenceRecord, StatisticsRepository,
};
pub use strategy::{StrategyFilter, StrategyInput, StrategyRecord, StrategyRepository};
