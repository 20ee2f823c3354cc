use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::core::{money, AppError, Clock, ReportingOffset, Result};
use crate::modules::reports::models::{
    CashierSales, HourlySalesRow, MonthlyItemsRow, MonthlySalesRow, PaymentMethodTotal,
    PeriodStats, ProductSales, RefundStats, Report, ReportRequest, SubQuery, TimeWindow,
    MAX_REPORT_YEAR, MIN_REPORT_YEAR,
};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::bucketing;

/// Tunables of the report aggregator
#[derive(Debug, Clone, Copy)]
pub struct ReportSettings {
    /// Length of the `top_products` ranking
    pub top_products_limit: u32,
    /// Deadline for each sub-query; the batch as a whole gets twice this
    pub query_timeout: Duration,
    /// Offset used for calendar boundaries and month/hour buckets
    pub offset: ReportingOffset,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_products_limit: 5,
            query_timeout: Duration::from_secs(15),
            offset: ReportingOffset::utc(),
        }
    }
}

/// Windows a request resolves to, computed before any I/O
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPlan {
    pub current: TimeWindow,
    /// Present only when comparison was requested
    pub previous: Option<TimeWindow>,
    pub year: i32,
    pub year_window: TimeWindow,
}

/// Raw results of one batch, one slot per sub-query
struct BatchResults {
    current: PeriodStats,
    items_sold: i64,
    previous: PeriodStats,
    top_products: Vec<ProductSales>,
    monthly_sales: Vec<MonthlySalesRow>,
    monthly_items: Vec<MonthlyItemsRow>,
    payment_methods: Vec<PaymentMethodTotal>,
    refunds: RefundStats,
    sales_by_item: Vec<ProductSales>,
    sales_by_cashier: Vec<CashierSales>,
    hourly: Vec<HourlySalesRow>,
}

/// Builds the dashboard report from eleven independent aggregation queries
pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
    clock: Arc<dyn Clock>,
    settings: ReportSettings,
}

impl ReportService {
    pub fn new(
        repo: Arc<dyn ReportRepository>,
        clock: Arc<dyn Clock>,
        settings: ReportSettings,
    ) -> Self {
        Self {
            repo,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Validate the request and resolve its windows.
    ///
    /// # Errors
    /// `InvalidPeriod` if the explicit range is reversed or the trend year is
    /// outside `MIN_REPORT_YEAR..=MAX_REPORT_YEAR`.
    pub fn plan(&self, request: &ReportRequest) -> Result<ReportPlan> {
        let offset = self.settings.offset;
        let now = self.clock.now();

        let current = match request.range {
            Some((start, end)) => TimeWindow::inclusive(start, end)?,
            None => request.period.resolve(now, offset),
        };

        let year = request.year.unwrap_or_else(|| offset.local_year(now));
        if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
            return Err(AppError::invalid_period(format!(
                "year {} is outside the supported range {}-{}",
                year, MIN_REPORT_YEAR, MAX_REPORT_YEAR
            )));
        }

        let (year_start, year_end) = offset
            .year_bounds(year)
            .ok_or_else(|| {
                AppError::invalid_period(format!("year {} cannot be represented", year))
            })?;

        Ok(ReportPlan {
            current,
            previous: request.compare_to_previous.then(|| current.previous()),
            year,
            year_window: TimeWindow::half_open(year_start, year_end)?,
        })
    }

    /// Generate the dashboard report.
    ///
    /// All sub-queries run concurrently. The first failure aborts the batch
    /// and drops the sibling queries still in flight; a sub-query that misses
    /// its deadline fails the same way, under its own name. Dropping the
    /// returned future (caller gone) or hitting the batch deadline also drops
    /// everything in flight. No partial report is ever returned and nothing
    /// is retried here.
    pub async fn generate(&self, request: ReportRequest) -> Result<Report> {
        let plan = self.plan(&request)?;
        let started = Instant::now();
        let batch_timeout = self.settings.query_timeout.saturating_mul(2);

        let results = match tokio::time::timeout(batch_timeout, self.run_batch(&plan)).await {
            Ok(results) => results?,
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(batch_timeout.as_millis()).unwrap_or(u64::MAX),
                    "Report batch timed out"
                );
                return Err(AppError::Timeout(format!(
                    "report batch did not complete within {:?}",
                    batch_timeout
                )));
            }
        };

        let mut report = self.assemble(&plan, results);
        report.generated_in_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if report.is_empty() {
            debug!(
                period_start = %plan.current.start,
                period_end = %plan.current.end,
                "Empty report generated"
            );
        }

        info!(
            period_start = %plan.current.start,
            period_end = %plan.current.end,
            year = plan.year,
            compare_to_previous = plan.previous.is_some(),
            generated_in_ms = report.generated_in_ms,
            "Dashboard report generated"
        );

        Ok(report)
    }

    async fn run_batch(&self, plan: &ReportPlan) -> Result<BatchResults> {
        let repo = self.repo.as_ref();
        let current = &plan.current;
        let year = &plan.year_window;
        let offset = self.settings.offset;
        let deadline = self.settings.query_timeout;

        let (
            current_stats,
            items_sold,
            previous,
            top_products,
            monthly_sales,
            monthly_items,
            payment_methods,
            refunds,
            sales_by_item,
            sales_by_cashier,
            hourly,
        ) = tokio::try_join!(
            tagged(deadline, SubQuery::CurrentPeriodStats, repo.period_stats(current)),
            tagged(deadline, SubQuery::ItemsSoldTotal, repo.items_sold(current)),
            tagged(deadline, SubQuery::PreviousPeriodStats, async {
                // Skipped comparison resolves like any other member of the batch
                match plan.previous.as_ref() {
                    Some(window) => repo.period_stats(window).await,
                    None => Ok(PeriodStats::default()),
                }
            }),
            tagged(
                deadline,
                SubQuery::TopProducts,
                repo.top_products(current, self.settings.top_products_limit)
            ),
            tagged(deadline, SubQuery::MonthlyTrend, repo.monthly_sales(year, offset)),
            tagged(deadline, SubQuery::MonthlyItemsTrend, repo.monthly_items(year, offset)),
            tagged(deadline, SubQuery::PaymentMethodBreakdown, repo.payment_methods(current)),
            tagged(deadline, SubQuery::RefundStats, repo.refund_stats(current)),
            tagged(deadline, SubQuery::SalesByItem, repo.sales_by_item(current)),
            tagged(deadline, SubQuery::SalesByCashier, repo.sales_by_cashier(current)),
            tagged(deadline, SubQuery::HourlyStats, repo.hourly_sales(current, offset)),
        )?;

        Ok(BatchResults {
            current: current_stats,
            items_sold,
            previous,
            top_products,
            monthly_sales,
            monthly_items,
            payment_methods,
            refunds,
            sales_by_item,
            sales_by_cashier,
            hourly,
        })
    }

    fn assemble(&self, plan: &ReportPlan, results: BatchResults) -> Report {
        let compared = plan.previous.is_some();
        let sales_change_percent = if compared {
            money::percent_change(
                results.current.total_amount_sales,
                results.previous.total_amount_sales,
            )
        } else {
            None
        };

        let top_limit = usize::try_from(self.settings.top_products_limit).unwrap_or(usize::MAX);

        Report {
            period_start: plan.current.start,
            period_end: plan.current.end,
            year: plan.year,
            compared_to_previous: compared,
            current_period_stats: results.current,
            previous_period_stats: results.previous,
            sales_change_percent,
            items_sold_total: results.items_sold,
            top_products: bucketing::rank_products(results.top_products, Some(top_limit)),
            monthly_trend: bucketing::fill_months(results.monthly_sales, results.monthly_items),
            payment_method_breakdown: results.payment_methods,
            refund_stats: results.refunds,
            sales_by_item: bucketing::rank_products(results.sales_by_item, None),
            sales_by_cashier: results.sales_by_cashier,
            hourly_stats: bucketing::fill_hours(results.hourly),
            generated_in_ms: 0,
        }
    }
}

/// Run one sub-query under its deadline and attach its name to any failure
async fn tagged<T, F>(deadline: Duration, query: SubQuery, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let result = match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!(
            "{} did not complete within {:?}",
            query, deadline
        ))),
    };

    result.map_err(|err| {
        warn!(query = query.name(), error = %err, "Report sub-query failed");
        AppError::query_failure(query.name(), err)
    })
}
