// HTTP routes

mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::MetricsAggregator;
use crate::report_repo::ReportRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) report_repo: Arc<ReportRepo>,
    pub(crate) aggregator: Arc<MetricsAggregator>,
}

pub fn app(report_repo: Arc<ReportRepo>, aggregator: Arc<MetricsAggregator>) -> Router {
    let state = AppState {
        report_repo,
        aggregator,
    };
    Router::new()
        .route("/", get(|| async { "loadreport: overview reports for load tests" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route(
            "/api/reports/{report_id}/overview",
            post(http::create_overview_handler).get(http::get_overview_handler),
        ) // POST, GET /api/reports/{report_id}/overview
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
