use tracing::debug;

use crate::features::assessments::models::{Assessment, Detection};
use crate::modules::storage::StoredFile;

/// Placeholder damage detector.
///
/// No model is called: every image is reported as damaged with a single
/// fixed detection.
#[derive(Debug, Clone, Default)]
pub struct AssessmentService;

impl AssessmentService {
    const STUB_CONFIDENCE: f64 = 0.95;
    const STUB_CLASS: &'static str = "damage";

    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, image: &StoredFile) -> Assessment {
        debug!(
            "Assessing image (stub): {} uploaded as {}",
            image.file_name, image.original_name
        );

        Assessment {
            has_damage: true,
            detections: vec![Detection {
                x: 100,
                y: 100,
                width: 50,
                height: 50,
                confidence: Self::STUB_CONFIDENCE,
                class_name: Self::STUB_CLASS.to_string(),
            }],
        }
    }
}
