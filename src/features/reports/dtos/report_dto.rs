use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::assessments::models::Detection;
use crate::features::reports::models::{AssetType, Report};

/// Query parameters shared by the listing and CSV endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Asset type to read, `windmill` (default) or `solar`
    #[serde(default, rename = "type")]
    #[param(value_type = Option<AssetType>)]
    pub asset_type: AssetType,
}

/// Inspection upload form for OpenAPI documentation.
/// The actual handler reads the multipart stream directly.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct PredictFormDto {
    /// Image of the inspected unit
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    /// Asset identifier (windmill number or solar panel id)
    #[serde(rename = "windmillNumber")]
    #[schema(example = "WM-12")]
    pub windmill_number: String,
    /// Where the unit is installed
    #[schema(example = "Field A")]
    pub location: String,
    /// `windmill` (default) or `solar`
    #[serde(rename = "type")]
    #[schema(example = "windmill")]
    pub asset_type: Option<String>,
}

/// Response for a processed inspection upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponseDto {
    pub windmill_number: String,
    pub location: String,
    /// `Yes` when damage was detected
    #[schema(example = "Yes")]
    pub damage: String,
    pub timestamp: DateTime<Utc>,
    pub predictions: Vec<Detection>,
}

/// Windmill listing item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WindmillReportDto {
    pub id: i64,
    #[serde(rename = "windmillNumber")]
    pub windmill_number: String,
    pub damage: String,
    pub location: String,
    pub image_path: String,
    pub timestamp: DateTime<Utc>,
}

/// Solar panel listing item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SolarPanelReportDto {
    pub id: i64,
    pub panel_id: String,
    pub damage: String,
    pub location: String,
    pub image_path: String,
    pub timestamp: DateTime<Utc>,
}

/// Listing item, shaped by the asset type it was read from
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ReportResponseDto {
    Windmill(WindmillReportDto),
    Solar(SolarPanelReportDto),
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        let timestamp = r.timestamp_utc();
        match r.asset_type {
            AssetType::Windmill => Self::Windmill(WindmillReportDto {
                id: r.id,
                windmill_number: r.asset_number,
                damage: r.damage,
                location: r.location,
                image_path: r.image_path,
                timestamp,
            }),
            AssetType::Solar => Self::Solar(SolarPanelReportDto {
                id: r.id,
                panel_id: r.asset_number,
                damage: r.damage,
                location: r.location,
                image_path: r.image_path,
                timestamp,
            }),
        }
    }
}
