use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{DAMAGE_NO, DAMAGE_YES};

/// A bounding box reported by the damage assessment, in image pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Detection {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub confidence: f64,
    #[serde(rename = "class")]
    #[schema(example = "damage")]
    pub class_name: String,
}

/// Outcome of assessing one uploaded image
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub has_damage: bool,
    pub detections: Vec<Detection>,
}

impl Assessment {
    /// Verdict as persisted in the `damage` column
    pub fn damage_label(&self) -> &'static str {
        if self.has_damage {
            DAMAGE_YES
        } else {
            DAMAGE_NO
        }
    }
}
