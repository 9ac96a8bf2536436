mod report;

pub use report::{AssetType, CreateReport, Report};
