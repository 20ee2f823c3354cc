pub mod bucketing;
pub mod report_service;

pub use report_service::{ReportPlan, ReportService, ReportSettings};
