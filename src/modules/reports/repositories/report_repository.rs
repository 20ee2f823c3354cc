use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{ReportingOffset, Result};
use crate::modules::reports::models::{
    CashierSales, HourlySalesRow, MonthlyItemsRow, MonthlySalesRow, PaymentMethodTotal,
    PeriodStats, ProductSales, RefundStats, TimeWindow,
};
use crate::modules::reports::repositories::pipeline;

/// Read-only aggregation pipelines backing the dashboard report.
///
/// Every method is independent of the others so the service can run them
/// concurrently. Implementations return rows only for buckets that have data;
/// zero-filling is the caller's job.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Count and sums of COMPLETED sales in the window
    async fn period_stats(&self, window: &TimeWindow) -> Result<PeriodStats>;

    /// Total quantity of line items on COMPLETED sales in the window
    async fn items_sold(&self, window: &TimeWindow) -> Result<i64>;

    /// Products ranked by quantity desc, then product id asc, at most `limit`
    async fn top_products(&self, window: &TimeWindow, limit: u32) -> Result<Vec<ProductSales>>;

    /// Sales grouped by local calendar month (1-12) inside `year`
    async fn monthly_sales(
        &self,
        year: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<MonthlySalesRow>>;

    /// Items sold grouped by local calendar month (1-12) inside `year`
    async fn monthly_items(
        &self,
        year: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<MonthlyItemsRow>>;

    async fn payment_methods(&self, window: &TimeWindow) -> Result<Vec<PaymentMethodTotal>>;

    /// Count and sum of REFUNDED sales in the window
    async fn refund_stats(&self, window: &TimeWindow) -> Result<RefundStats>;

    /// Every product sold in the window
    async fn sales_by_item(&self, window: &TimeWindow) -> Result<Vec<ProductSales>>;

    async fn sales_by_cashier(&self, window: &TimeWindow) -> Result<Vec<CashierSales>>;

    /// Sales grouped by local hour of day (0-23)
    async fn hourly_sales(
        &self,
        window: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<HourlySalesRow>>;
}

pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn period_stats(&self, window: &TimeWindow) -> Result<PeriodStats> {
        let mut qb = pipeline::period_stats(window);
        let stats = qb
            .build_query_as::<PeriodStats>()
            .fetch_one(&self.pool)
            .await?;
        Ok(stats)
    }

    async fn items_sold(&self, window: &TimeWindow) -> Result<i64> {
        let mut qb = pipeline::items_sold(window);
        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn top_products(&self, window: &TimeWindow, limit: u32) -> Result<Vec<ProductSales>> {
        let mut qb = pipeline::product_sales(window, Some(limit));
        let rows = qb
            .build_query_as::<ProductSales>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn monthly_sales(
        &self,
        year: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<MonthlySalesRow>> {
        let mut qb = pipeline::monthly_sales(year, offset);
        let rows = qb
            .build_query_as::<MonthlySalesRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn monthly_items(
        &self,
        year: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<MonthlyItemsRow>> {
        let mut qb = pipeline::monthly_items(year, offset);
        let rows = qb
            .build_query_as::<MonthlyItemsRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn payment_methods(&self, window: &TimeWindow) -> Result<Vec<PaymentMethodTotal>> {
        let mut qb = pipeline::payment_methods(window);
        let rows = qb
            .build_query_as::<PaymentMethodTotal>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn refund_stats(&self, window: &TimeWindow) -> Result<RefundStats> {
        let mut qb = pipeline::refund_stats(window);
        let stats = qb
            .build_query_as::<RefundStats>()
            .fetch_one(&self.pool)
            .await?;
        Ok(stats)
    }

    async fn sales_by_item(&self, window: &TimeWindow) -> Result<Vec<ProductSales>> {
        let mut qb = pipeline::product_sales(window, None);
        let rows = qb
            .build_query_as::<ProductSales>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn sales_by_cashier(&self, window: &TimeWindow) -> Result<Vec<CashierSales>> {
        let mut qb = pipeline::sales_by_cashier(window);
        let rows = qb
            .build_query_as::<CashierSales>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn hourly_sales(
        &self,
        window: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<HourlySalesRow>> {
        let mut qb = pipeline::hourly_sales(window, offset);
        let rows = qb
            .build_query_as::<HourlySalesRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
