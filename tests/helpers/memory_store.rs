use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Timelike};
use rust_decimal::Decimal;

use pos_dashboard::core::{AppError, ReportingOffset, Result};
use pos_dashboard::modules::cash_drawer::models::{
    CashDrawerEntry, DrawerSummary, DrawerTotals, EntryType,
};
use pos_dashboard::modules::cash_drawer::repositories::CashDrawerRepository;
use pos_dashboard::modules::reports::models::{
    CashierSales, EndBound, HourlySalesRow, MonthlyItemsRow, MonthlySalesRow, PaymentMethodTotal,
    PeriodStats, ProductSales, RefundStats, SaleLineItem, SaleStatus, SaleTransaction, SubQuery,
    TimeWindow,
};
use pos_dashboard::modules::reports::repositories::ReportRepository;
use pos_dashboard::modules::reports::services::bucketing;

/// In-memory sales store answering the report pipelines.
///
/// The previous-period stats call is told apart from the current one by its
/// half-open window.
#[derive(Default)]
pub struct InMemoryReportRepository {
    sales: Vec<SaleTransaction>,
    items: Vec<SaleLineItem>,
    products: HashMap<String, String>,
    employees: HashMap<String, String>,
    failing: Option<SubQuery>,
    delay: Option<Duration>,
    delays: HashMap<SubQuery, Duration>,
    calls: Mutex<Vec<SubQuery>>,
    completed: Mutex<Vec<SubQuery>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sale(mut self, sale: SaleTransaction) -> Self {
        self.sales.push(sale);
        self
    }

    pub fn with_item(mut self, item: SaleLineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_product(mut self, id: &str, name: &str) -> Self {
        self.products.insert(id.to_string(), name.to_string());
        self
    }

    pub fn with_employee(mut self, id: &str, name: &str) -> Self {
        self.employees.insert(id.to_string(), name.to_string());
        self
    }

    /// Make the named sub-query fail with an internal error
    pub fn failing_on(mut self, query: SubQuery) -> Self {
        self.failing = Some(query);
        self
    }

    /// Sleep before answering every sub-query
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleep before answering the named sub-query, overriding `with_delay`
    pub fn with_delay_on(mut self, query: SubQuery, delay: Duration) -> Self {
        self.delays.insert(query, delay);
        self
    }

    /// Sub-queries started so far, in arrival order
    pub fn calls(&self) -> Vec<SubQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Sub-queries that ran to a successful answer
    pub fn completed(&self) -> Vec<SubQuery> {
        self.completed.lock().unwrap().clone()
    }

    pub fn call_count(&self, query: SubQuery) -> usize {
        self.calls().iter().filter(|q| **q == query).count()
    }

    async fn enter(&self, query: SubQuery) -> Result<()> {
        self.calls.lock().unwrap().push(query);

        if let Some(delay) = self.delays.get(&query).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }

        if self.failing == Some(query) {
            return Err(AppError::internal(format!("injected failure in {}", query)));
        }

        self.completed.lock().unwrap().push(query);
        Ok(())
    }

    fn sales_in<'a>(
        &'a self,
        status: SaleStatus,
        window: &'a TimeWindow,
    ) -> impl Iterator<Item = &'a SaleTransaction> + 'a {
        self.sales
            .iter()
            .filter(move |s| s.status == status && window.contains(s.created_at))
    }

    fn items_in<'a>(
        &'a self,
        window: &'a TimeWindow,
    ) -> impl Iterator<Item = (&'a SaleTransaction, &'a SaleLineItem)> + 'a {
        self.sales_in(SaleStatus::Completed, window).flat_map(move |sale| {
            self.items
                .iter()
                .filter(move |item| item.sale_id == sale.id)
                .map(move |item| (sale, item))
        })
    }

    fn product_sales(&self, window: &TimeWindow, limit: Option<usize>) -> Vec<ProductSales> {
        let mut grouped: BTreeMap<&str, (i64, Decimal)> = BTreeMap::new();
        for (_, item) in self.items_in(window) {
            let entry = grouped.entry(item.product_id.as_str()).or_default();
            entry.0 += item.quantity;
            entry.1 += item.subtotal();
        }

        let rows = grouped
            .into_iter()
            .map(|(product_id, (quantity, amount))| ProductSales {
                product_id: product_id.to_string(),
                product_name: self.products.get(product_id).cloned(),
                total_quantity: quantity,
                total_amount: amount,
            })
            .collect();

        bucketing::rank_products(rows, limit)
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn period_stats(&self, window: &TimeWindow) -> Result<PeriodStats> {
        let query = match window.end_bound {
            EndBound::Inclusive => SubQuery::CurrentPeriodStats,
            EndBound::Exclusive => SubQuery::PreviousPeriodStats,
        };
        self.enter(query).await?;

        Ok(self
            .sales_in(SaleStatus::Completed, window)
            .fold(PeriodStats::default(), |mut stats, sale| {
                stats.number_of_transactions += 1;
                stats.total_amount_sales += sale.total_amount;
                stats.total_cost_of_goods += sale.cost_of_goods;
                stats.total_gross_profit += sale.gross_profit;
                stats
            }))
    }

    async fn items_sold(&self, window: &TimeWindow) -> Result<i64> {
        self.enter(SubQuery::ItemsSoldTotal).await?;
        Ok(self.items_in(window).map(|(_, item)| item.quantity).sum())
    }

    async fn top_products(&self, window: &TimeWindow, limit: u32) -> Result<Vec<ProductSales>> {
        self.enter(SubQuery::TopProducts).await?;
        Ok(self.product_sales(window, Some(limit as usize)))
    }

    async fn monthly_sales(
        &self,
        year: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<MonthlySalesRow>> {
        self.enter(SubQuery::MonthlyTrend).await?;

        let mut grouped: BTreeMap<i64, (Decimal, i64)> = BTreeMap::new();
        for sale in self.sales_in(SaleStatus::Completed, year) {
            let month = i64::from(offset.to_local(sale.created_at).month());
            let entry = grouped.entry(month).or_default();
            entry.0 += sale.total_amount;
            entry.1 += 1;
        }

        Ok(grouped
            .into_iter()
            .map(|(month, (total, count))| MonthlySalesRow {
                month,
                total_amount_sales: total,
                number_of_transactions: count,
            })
            .collect())
    }

    async fn monthly_items(
        &self,
        year: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<MonthlyItemsRow>> {
        self.enter(SubQuery::MonthlyItemsTrend).await?;

        let mut grouped: BTreeMap<i64, i64> = BTreeMap::new();
        for (sale, item) in self.items_in(year) {
            let month = i64::from(offset.to_local(sale.created_at).month());
            *grouped.entry(month).or_default() += item.quantity;
        }

        Ok(grouped
            .into_iter()
            .map(|(month, items_sold)| MonthlyItemsRow { month, items_sold })
            .collect())
    }

    async fn payment_methods(&self, window: &TimeWindow) -> Result<Vec<PaymentMethodTotal>> {
        self.enter(SubQuery::PaymentMethodBreakdown).await?;

        let mut grouped: BTreeMap<&str, (Decimal, i64)> = BTreeMap::new();
        for sale in self.sales_in(SaleStatus::Completed, window) {
            let entry = grouped.entry(sale.payment_method.as_str()).or_default();
            entry.0 += sale.total_amount;
            entry.1 += 1;
        }

        let mut rows: Vec<PaymentMethodTotal> = grouped
            .into_iter()
            .map(|(method, (total, count))| PaymentMethodTotal {
                payment_method: method.to_string(),
                total_amount: total,
                number_of_transactions: count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.payment_method.cmp(&b.payment_method))
        });
        Ok(rows)
    }

    async fn refund_stats(&self, window: &TimeWindow) -> Result<RefundStats> {
        self.enter(SubQuery::RefundStats).await?;

        Ok(self
            .sales_in(SaleStatus::Refunded, window)
            .fold(RefundStats::default(), |mut stats, sale| {
                stats.number_of_refunds += 1;
                stats.total_refunded += sale.total_amount;
                stats
            }))
    }

    async fn sales_by_item(&self, window: &TimeWindow) -> Result<Vec<ProductSales>> {
        self.enter(SubQuery::SalesByItem).await?;
        Ok(self.product_sales(window, None))
    }

    async fn sales_by_cashier(&self, window: &TimeWindow) -> Result<Vec<CashierSales>> {
        self.enter(SubQuery::SalesByCashier).await?;

        let mut grouped: BTreeMap<&str, (Decimal, i64)> = BTreeMap::new();
        for sale in self.sales_in(SaleStatus::Completed, window) {
            let entry = grouped.entry(sale.cashier_id.as_str()).or_default();
            entry.0 += sale.total_amount;
            entry.1 += 1;
        }

        let mut rows: Vec<CashierSales> = grouped
            .into_iter()
            .map(|(cashier_id, (total, count))| CashierSales {
                cashier_id: cashier_id.to_string(),
                cashier_name: self.employees.get(cashier_id).cloned(),
                total_amount_sales: total,
                number_of_transactions: count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_amount_sales
                .cmp(&a.total_amount_sales)
                .then_with(|| a.cashier_id.cmp(&b.cashier_id))
        });
        Ok(rows)
    }

    async fn hourly_sales(
        &self,
        window: &TimeWindow,
        offset: ReportingOffset,
    ) -> Result<Vec<HourlySalesRow>> {
        self.enter(SubQuery::HourlyStats).await?;

        let mut grouped: BTreeMap<i64, (Decimal, i64)> = BTreeMap::new();
        for sale in self.sales_in(SaleStatus::Completed, window) {
            let hour = i64::from(offset.to_local(sale.created_at).hour());
            let entry = grouped.entry(hour).or_default();
            entry.0 += sale.total_amount;
            entry.1 += 1;
        }

        Ok(grouped
            .into_iter()
            .map(|(hour, (total, count))| HourlySalesRow {
                hour,
                total_amount_sales: total,
                number_of_transactions: count,
            })
            .collect())
    }
}

/// In-memory drawer ledger
#[derive(Default)]
pub struct InMemoryCashDrawerRepository {
    entries: Mutex<Vec<CashDrawerEntry>>,
}

impl InMemoryCashDrawerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry directly, bypassing the service checks
    pub fn with_entry(self, entry: CashDrawerEntry) -> Self {
        self.entries.lock().unwrap().push(entry);
        self
    }

    pub fn entries(&self) -> Vec<CashDrawerEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CashDrawerRepository for InMemoryCashDrawerRepository {
    async fn insert(&self, entry: &CashDrawerEntry) -> Result<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn summarize(
        &self,
        window: &TimeWindow,
        cashier_id: Option<&str>,
    ) -> Result<DrawerSummary> {
        let entries = self.entries.lock().unwrap();
        let totals = entries
            .iter()
            .filter(|e| window.contains(e.created_at))
            .filter(|e| cashier_id.map_or(true, |id| e.cashier_id == id))
            .fold(DrawerTotals::default(), |mut totals, e| {
                match e.entry_type {
                    EntryType::In => totals.cash_in += e.amount,
                    EntryType::Out => totals.cash_out += e.amount,
                    EntryType::Sale => totals.cash_sales += e.amount,
                }
                totals.entry_count += 1;
                totals
            });

        Ok(DrawerSummary::from(totals))
    }
}
