// Handlers: version, overview submit/fetch

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::models::ReportKey;
use crate::overview::{self, OverviewError};
use crate::source::{JsonResultSource, ResultDocument};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /api/reports/{report_id}/overview — aggregate an extracted result document and store it.
pub(super) async fn create_overview_handler(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    Json(doc): Json<ResultDocument>,
) -> Result<impl IntoResponse, ApiError> {
    let source = JsonResultSource::from(doc);
    let report = overview::generate(
        &source,
        state.aggregator.as_ref(),
        state.report_repo.as_ref(),
        &report_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/reports/{report_id}/overview
pub(super) async fn get_overview_handler(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .report_repo
        .get_result(&report_id, ReportKey::Overview)
        .await
        .map_err(ApiError::Internal)?;
    match report {
        Some(report) => Ok(Json(report)),
        None => Err(ApiError::NotFound(report_id)),
    }
}

pub(super) enum ApiError {
    Unprocessable(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl From<OverviewError> for ApiError {
    fn from(e: OverviewError) -> Self {
        match e {
            OverviewError::Aggregate(e) => ApiError::Unprocessable(e.to_string()),
            OverviewError::Store(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(report_id) => (
                StatusCode::NOT_FOUND,
                format!("no overview for report `{}`", report_id),
            ),
            ApiError::Internal(e) => {
                tracing::warn!(error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
