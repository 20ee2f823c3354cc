pub mod period;
pub mod report;
pub mod sale;

pub use period::{
    EndBound, ReportPeriod, ReportRequest, SubQuery, TimeWindow, MAX_REPORT_YEAR, MIN_REPORT_YEAR,
};
pub use report::{
    CashierSales, HourlyBucket, HourlySalesRow, MonthlyBucket, MonthlyItemsRow, MonthlySalesRow,
    PaymentMethodTotal, PeriodStats, ProductSales, RefundStats, Report,
};
pub use sale::{SaleLineItem, SaleStatus, SaleTransaction};
