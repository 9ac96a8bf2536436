/// Maximum accepted image size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// URL prefix under which the upload directory is served
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Damage verdict stored for assessments that found damage
pub const DAMAGE_YES: &str = "Yes";

/// Damage verdict stored for assessments that found nothing
pub const DAMAGE_NO: &str = "No";
