use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::reports::dtos::{ReportQuery, ReportResponseDto};
use crate::features::reports::services::{InspectionService, ReportService};
use crate::shared::types::ErrorResponse;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub inspection_service: Arc<InspectionService>,
}

/// List reports for one asset type, newest first
#[utoipa::path(
    get,
    path = "/reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Reports of the requested asset type", body = Vec<ReportResponseDto>),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, description = "Failed to fetch reports", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = state.report_service.list(query.asset_type).await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(dtos))
}

/// Download reports for one asset type as a CSV attachment
#[utoipa::path(
    get,
    path = "/reports/csv",
    params(ReportQuery),
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv", body = String),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, description = "Failed to fetch reports", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn export_reports_csv(
    State(state): State<ReportState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> Result<Response> {
    let csv = state.report_service.export_csv(query.asset_type).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        query.asset_type.csv_file_name()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
