//! Route definitions for the Sedentarism Study API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod barriers;
mod export;
mod health;
mod participants;
mod questionnaires;
mod statistics;
mod strategies;


pub use barriers::barrier_routes;
pub use export::export_routes;
pub use participants::participant_routes;
pub use questionnaires::questionnaire_routes;
pub use statistics::statistics_routes;
pub use strategies::strategy_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Sedentarism Study API v1" }))
        .nest("/participants", participant_routes())
        .nest("/questionnaires", questionnaire_routes())
        .nest("/barriers", barrier_routes())
        .nest("/strategies", strategy_routes())
        .nest("/statistics", statistics_routes())
        .nest("/export", export_routes())
}
