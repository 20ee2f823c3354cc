use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals of COMPLETED sales inside one window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PeriodStats {
    pub number_of_transactions: i64,
    pub total_amount_sales: Decimal,
    pub total_cost_of_goods: Decimal,
    pub total_gross_profit: Decimal,
}

impl PeriodStats {
    pub fn is_empty(&self) -> bool {
        self.number_of_transactions == 0
    }
}

/// Quantity and revenue of one product inside the period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSales {
    pub product_id: String,
    pub product_name: Option<String>,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

/// Sales per local calendar month, as grouped by the store
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MonthlySalesRow {
    pub month: i64,
    pub total_amount_sales: Decimal,
    pub number_of_transactions: i64,
}

/// Items sold per local calendar month, as grouped by the store
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MonthlyItemsRow {
    pub month: i64,
    pub items_sold: i64,
}

/// Sales per local hour of day, as grouped by the store
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct HourlySalesRow {
    pub hour: i64,
    pub total_amount_sales: Decimal,
    pub number_of_transactions: i64,
}

/// One month of the yearly trend; `month` is 1-12
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: u32,
    pub total_amount_sales: Decimal,
    pub number_of_transactions: i64,
    pub items_sold: i64,
}

impl MonthlyBucket {
    pub fn empty(month: u32) -> Self {
        Self {
            month,
            total_amount_sales: Decimal::ZERO,
            number_of_transactions: 0,
            items_sold: 0,
        }
    }
}

/// One hour of the intraday trend; `hour` is 0-23
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub total_amount_sales: Decimal,
    pub number_of_transactions: i64,
}

impl HourlyBucket {
    pub fn empty(hour: u32) -> Self {
        Self {
            hour,
            total_amount_sales: Decimal::ZERO,
            number_of_transactions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentMethodTotal {
    pub payment_method: String,
    pub total_amount: Decimal,
    pub number_of_transactions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefundStats {
    pub number_of_refunds: i64,
    pub total_refunded: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CashierSales {
    pub cashier_id: String,
    pub cashier_name: Option<String>,
    pub total_amount_sales: Decimal,
    pub number_of_transactions: i64,
}

/// Dashboard report, built per request and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub year: i32,
    pub compared_to_previous: bool,
    pub current_period_stats: PeriodStats,
    /// All zeros unless `compared_to_previous`
    pub previous_period_stats: PeriodStats,
    /// Sales growth vs. the previous window in percent
    pub sales_change_percent: Option<Decimal>,
    pub items_sold_total: i64,
    pub top_products: Vec<ProductSales>,
    pub monthly_trend: Vec<MonthlyBucket>,
    pub payment_method_breakdown: Vec<PaymentMethodTotal>,
    pub refund_stats: RefundStats,
    pub sales_by_item: Vec<ProductSales>,
    pub sales_by_cashier: Vec<CashierSales>,
    pub hourly_stats: Vec<HourlyBucket>,
    pub generated_in_ms: u64,
}

impl Report {
    /// True when the period saw no completed sales and no refunds
    pub fn is_empty(&self) -> bool {
        self.current_period_stats.is_empty() && self.refund_stats.number_of_refunds == 0
    }
}
