use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::reports::dtos::{PredictFormDto, PredictResponseDto};
use crate::features::reports::handlers::ReportState;
use crate::features::reports::models::AssetType;
use crate::features::reports::services::SubmitInspection;
use crate::shared::constants::MAX_FILE_SIZE;
use crate::shared::types::ErrorResponse;

/// Raw multipart fields before validation
#[derive(Debug, Default)]
struct PredictForm {
    image: Option<(String, Vec<u8>)>,
    windmill_number: Option<String>,
    location: Option<String>,
    asset_type: Option<String>,
}

impl PredictForm {
    /// Presence checks in the order clients expect their messages
    fn validate(self) -> Result<SubmitInspection, AppError> {
        let (original_file_name, image) = self
            .image
            .ok_or_else(|| AppError::Validation("No image uploaded".to_string()))?;

        let asset_number = non_blank(self.windmill_number)
            .ok_or_else(|| AppError::Validation("Windmill number is required".to_string()))?;

        let location = non_blank(self.location)
            .ok_or_else(|| AppError::Validation("Location is required".to_string()))?;

        let asset_type = self
            .asset_type
            .as_deref()
            .map(AssetType::from)
            .unwrap_or_default();

        if image.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                MAX_FILE_SIZE,
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        Ok(SubmitInspection {
            asset_type,
            asset_number,
            location,
            original_file_name,
            image,
        })
    }
}

/// Whitespace-only text counts as missing; present text is kept as sent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Bodies cut off by the request size limit keep their 413 status
fn multipart_error(what: &str, e: MultipartError) -> AppError {
    debug!("Failed to read {}: {}", what, e);

    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", what, e))
    }
}

/// Upload an inspection image and record the damage assessment
///
/// Accepts multipart/form-data with:
/// - `image`: the image file (required)
/// - `windmillNumber`: asset identifier (required)
/// - `location`: installation site (required)
/// - `type`: `solar` for solar panels, anything else records a windmill
#[utoipa::path(
    post,
    path = "/predict",
    tag = "inspections",
    request_body(
        content = PredictFormDto,
        content_type = "multipart/form-data",
        description = "Inspection image with asset number, location and optional asset type",
    ),
    responses(
        (status = 200, description = "Image stored and report recorded", body = PredictResponseDto),
        (status = 400, description = "Missing field or malformed upload", body = ErrorResponse),
        (status = 413, description = "Upload too large"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn predict(
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponseDto>, AppError> {
    let mut form = PredictForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("multipart data", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let file_name = field.file_name().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("image data", e))?;

                // Browsers send an empty, unnamed part when no file was picked
                let file_name = file_name.filter(|n| !n.is_empty());
                if file_name.is_none() && data.is_empty() {
                    continue;
                }

                form.image = Some((
                    file_name.unwrap_or_else(|| "unnamed".to_string()),
                    data.to_vec(),
                ));
            }
            "windmillNumber" | "location" | "type" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&field_name, e))?;

                match field_name.as_str() {
                    "windmillNumber" => form.windmill_number = Some(text),
                    "location" => form.location = Some(text),
                    _ => form.asset_type = Some(text),
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let submission = form.validate()?;
    let outcome = state.inspection_service.submit(submission).await?;

    Ok(Json(PredictResponseDto {
        windmill_number: outcome.report.asset_number.clone(),
        location: outcome.report.location.clone(),
        damage: outcome.report.damage.clone(),
        timestamp: outcome.report.timestamp_utc(),
        predictions: outcome.assessment.detections,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> PredictForm {
        PredictForm {
            image: Some(("blade.jpg".to_string(), b"jpeg".to_vec())),
            windmill_number: Some("WM-12".to_string()),
            location: Some("Field A".to_string()),
            asset_type: None,
        }
    }

    fn validation_message(form: PredictForm) -> String {
        match form.validate() {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_form_defaults_to_windmill() {
        let submission = complete_form().validate().unwrap();

        assert_eq!(submission.asset_type, AssetType::Windmill);
        assert_eq!(submission.asset_number, "WM-12");
        assert_eq!(submission.original_file_name, "blade.jpg");
    }

    #[test]
    fn test_missing_fields_report_in_order() {
        let mut form = complete_form();
        form.image = None;
        form.location = None;
        assert_eq!(validation_message(form), "No image uploaded");

        let mut form = complete_form();
        form.windmill_number = Some("   ".to_string());
        form.location = None;
        assert_eq!(validation_message(form), "Windmill number is required");

        let mut form = complete_form();
        form.location = Some(String::new());
        assert_eq!(validation_message(form), "Location is required");
    }

    #[test]
    fn test_unrecognised_type_selects_windmill() {
        let mut form = complete_form();
        form.asset_type = Some("rotor".to_string());

        assert_eq!(form.validate().unwrap().asset_type, AssetType::Windmill);
    }

    #[test]
    fn test_oversized_image_is_bad_request() {
        let mut form = complete_form();
        form.image = Some(("blade.jpg".to_string(), vec![0u8; MAX_FILE_SIZE + 1]));

        assert!(matches!(form.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_fields_keep_caller_text() {
        let mut form = complete_form();
        form.windmill_number = Some("  WM-2  ".to_string());
        form.location = Some(" Field B ".to_string());

        let submission = form.validate().unwrap();
        assert_eq!(submission.asset_number, "  WM-2  ");
        assert_eq!(submission.location, " Field B ");
    }

    #[test]
    fn test_blank_type_selects_windmill() {
        let mut form = complete_form();
        form.asset_type = Some(String::new());

        assert_eq!(form.validate().unwrap().asset_type, AssetType::Windmill);
    }
}
