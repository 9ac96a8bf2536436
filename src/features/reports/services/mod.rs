mod inspection_service;
mod report_service;

pub use inspection_service::{InspectionService, SubmitInspection};
pub use report_service::ReportService;
