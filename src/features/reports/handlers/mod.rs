pub mod predict_handler;
pub mod report_handler;

pub use predict_handler::predict;
pub use report_handler::{export_reports_csv, list_reports, ReportState};
