pub mod pipeline;
pub mod report_repository;

pub use report_repository::{MySqlReportRepository, ReportRepository};
