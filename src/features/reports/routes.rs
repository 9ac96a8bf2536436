use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{InspectionService, ReportService};

/// Create routes for inspection uploads and report read-back
pub fn routes(
    report_service: Arc<ReportService>,
    inspection_service: Arc<InspectionService>,
    max_request_body_size: usize,
) -> Router {
    let state = ReportState {
        report_service,
        inspection_service,
    };

    Router::new()
        .route(
            "/predict",
            post(handlers::predict).layer(DefaultBodyLimit::max(max_request_body_size)),
        )
        .route("/reports", get(handlers::list_reports))
        .route("/reports/csv", get(handlers::export_reports_csv))
        .with_state(state)
}
