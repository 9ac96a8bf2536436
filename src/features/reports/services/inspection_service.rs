use std::sync::Arc;

use tracing::{info, warn};

use crate::core::error::Result;
use crate::features::assessments::models::Assessment;
use crate::features::assessments::AssessmentService;
use crate::features::reports::models::{AssetType, CreateReport, Report};
use crate::features::reports::services::ReportService;
use crate::modules::storage::LocalDiskStorage;

/// A validated inspection upload
#[derive(Debug, Clone)]
pub struct SubmitInspection {
    pub asset_type: AssetType,
    pub asset_number: String,
    pub location: String,
    pub original_file_name: String,
    pub image: Vec<u8>,
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct InspectionOutcome {
    pub report: Report,
    pub assessment: Assessment,
}

/// Stores the image, assesses it and records the report.
pub struct InspectionService {
    storage: Arc<LocalDiskStorage>,
    assessment_service: Arc<AssessmentService>,
    report_service: Arc<ReportService>,
}

impl InspectionService {
    pub fn new(
        storage: Arc<LocalDiskStorage>,
        assessment_service: Arc<AssessmentService>,
        report_service: Arc<ReportService>,
    ) -> Self {
        Self {
            storage,
            assessment_service,
            report_service,
        }
    }

    /// The image is written before the row is inserted. If the insert fails
    /// the written file is deleted again so no orphan is left behind.
    pub async fn submit(&self, submission: SubmitInspection) -> Result<InspectionOutcome> {
        info!(
            "Processing {} inspection for asset: {}",
            submission.asset_type, submission.asset_number
        );

        let stored = self
            .storage
            .store(&submission.original_file_name, &submission.image)
            .await?;

        let assessment = self.assessment_service.assess(&stored);

        let create = CreateReport {
            asset_type: submission.asset_type,
            asset_number: submission.asset_number,
            damage: assessment.damage_label().to_string(),
            location: submission.location,
            image_path: stored.path_string(),
        };

        let report = match self.report_service.create(&create).await {
            Ok(report) => report,
            Err(e) => {
                warn!(
                    "Report insert failed, discarding upload {}",
                    stored.path.display()
                );
                self.storage.remove(&stored).await;
                return Err(e);
            }
        };

        Ok(InspectionOutcome { report, assessment })
    }
}
