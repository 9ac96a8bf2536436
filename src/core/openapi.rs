use utoipa::{Modify, OpenApi};

use crate::features::assessments::models as assessments_models;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Inspections
        reports_handlers::predict_handler::predict,
        // Reports
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::export_reports_csv,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Assessments
            assessments_models::Detection,
            // Reports
            reports_models::AssetType,
            reports_dtos::PredictFormDto,
            reports_dtos::PredictResponseDto,
            reports_dtos::WindmillReportDto,
            reports_dtos::SolarPanelReportDto,
            reports_dtos::ReportResponseDto,
        )
    ),
    tags(
        (name = "inspections", description = "Inspection image uploads and damage assessment"),
        (name = "reports", description = "Damage report listing and CSV export"),
    ),
    info(
        title = "Windmill Inspection API",
        version = "0.1.0",
        description = "Damage reports for windmill blades and solar panels",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_inspection_endpoints() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/predict"));
        assert!(doc.paths.paths.contains_key("/reports"));
        assert!(doc.paths.paths.contains_key("/reports/csv"));
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Custom docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Custom docs"));
    }
}
