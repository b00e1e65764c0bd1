//! Dataset export API routes

use crate::error::ApiError;
use crate::services::ExportService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Create export routes
pub fn export_routes() -> Router<AppState> {
    Router::new().route("/csv/questionnaires", get(export_questionnaires_csv))
}

/// GET /api/v1/export/csv/questionnaires - Anonymised questionnaire dataset
async fn export_questionnaires_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = ExportService::export_questionnaires_csv(state.db()).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"ipaq-questionnaires.csv\""),
    );

    Ok((headers, csv))
}
