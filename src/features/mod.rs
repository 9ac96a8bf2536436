pub mod assessments;
pub mod reports;
pub mod uploads;
