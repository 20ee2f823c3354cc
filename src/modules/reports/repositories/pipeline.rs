//! SQL pipeline construction for the report sub-queries.
//!
//! Each builder returns a `QueryBuilder` so every filter value travels as a
//! bound parameter. The bucketing offset is the one literal spliced into the
//! statement: it is a validated integer, and keeping it out of the bind list
//! lets the `GROUP BY` refer to the projected bucket.

use sqlx::{MySql, QueryBuilder};

use crate::core::ReportingOffset;
use crate::modules::reports::models::{EndBound, SaleStatus, TimeWindow};

/// Appends `<column> >= ? AND <column> <=|< ?` for the window
pub fn push_window(qb: &mut QueryBuilder<'static, MySql>, column: &str, window: &TimeWindow) {
    qb.push(column).push(" >= ").push_bind(window.start);
    qb.push(" AND ").push(column);
    match window.end_bound {
        EndBound::Inclusive => qb.push(" <= "),
        EndBound::Exclusive => qb.push(" < "),
    };
    qb.push_bind(window.end);
}

/// Appends `WHERE s.status = ? AND <window on s.created_at>`
fn push_sale_filter(
    qb: &mut QueryBuilder<'static, MySql>,
    status: SaleStatus,
    window: &TimeWindow,
) {
    qb.push(" WHERE s.status = ").push_bind(status.as_str());
    qb.push(" AND ");
    push_window(qb, "s.created_at", window);
}

/// Local-time expression of `s.created_at`
fn local_created_at(offset: ReportingOffset) -> String {
    format!("DATE_ADD(s.created_at, INTERVAL {} MINUTE)", offset.minutes())
}

pub fn period_stats(window: &TimeWindow) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT COUNT(*) AS number_of_transactions, \
         COALESCE(SUM(s.total_amount), 0) AS total_amount_sales, \
         COALESCE(SUM(s.cost_of_goods), 0) AS total_cost_of_goods, \
         COALESCE(SUM(s.gross_profit), 0) AS total_gross_profit \
         FROM sales s",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, window);
    qb
}

pub fn items_sold(window: &TimeWindow) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT CAST(COALESCE(SUM(si.quantity), 0) AS SIGNED) AS items_sold \
         FROM sale_items si \
         JOIN sales s ON s.id = si.sale_id",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, window);
    qb
}

/// Per-product quantity and revenue, ranked by quantity then product id.
/// `limit = None` returns the full distribution.
pub fn product_sales(window: &TimeWindow, limit: Option<u32>) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT si.product_id AS product_id, \
         p.name AS product_name, \
         CAST(SUM(si.quantity) AS SIGNED) AS total_quantity, \
         COALESCE(SUM(si.price_at_sale * si.quantity), 0) AS total_amount \
         FROM sale_items si \
         JOIN sales s ON s.id = si.sale_id \
         LEFT JOIN products p ON p.id = si.product_id",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, window);
    qb.push(" GROUP BY si.product_id, p.name");
    qb.push(" ORDER BY total_quantity DESC, si.product_id ASC");
    if let Some(limit) = limit {
        qb.push(" LIMIT ").push_bind(i64::from(limit));
    }
    qb
}

pub fn monthly_sales(year: &TimeWindow, offset: ReportingOffset) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT CAST(MONTH(");
    qb.push(local_created_at(offset));
    qb.push(
        ") AS SIGNED) AS month, \
         COALESCE(SUM(s.total_amount), 0) AS total_amount_sales, \
         COUNT(*) AS number_of_transactions \
         FROM sales s",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, year);
    qb.push(" GROUP BY month ORDER BY month");
    qb
}

pub fn monthly_items(year: &TimeWindow, offset: ReportingOffset) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT CAST(MONTH(");
    qb.push(local_created_at(offset));
    qb.push(
        ") AS SIGNED) AS month, \
         CAST(COALESCE(SUM(si.quantity), 0) AS SIGNED) AS items_sold \
         FROM sale_items si \
         JOIN sales s ON s.id = si.sale_id",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, year);
    qb.push(" GROUP BY month ORDER BY month");
    qb
}

pub fn payment_methods(window: &TimeWindow) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT s.payment_method AS payment_method, \
         COALESCE(SUM(s.total_amount), 0) AS total_amount, \
         COUNT(*) AS number_of_transactions \
         FROM sales s",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, window);
    qb.push(" GROUP BY s.payment_method ORDER BY total_amount DESC, s.payment_method ASC");
    qb
}

pub fn refund_stats(window: &TimeWindow) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT COUNT(*) AS number_of_refunds, \
         COALESCE(SUM(s.total_amount), 0) AS total_refunded \
         FROM sales s",
    );
    push_sale_filter(&mut qb, SaleStatus::Refunded, window);
    qb
}

pub fn sales_by_cashier(window: &TimeWindow) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT s.cashier_id AS cashier_id, \
         e.name AS cashier_name, \
         COALESCE(SUM(s.total_amount), 0) AS total_amount_sales, \
         COUNT(*) AS number_of_transactions \
         FROM sales s \
         LEFT JOIN employees e ON e.id = s.cashier_id",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, window);
    qb.push(" GROUP BY s.cashier_id, e.name ORDER BY total_amount_sales DESC, s.cashier_id ASC");
    qb
}

pub fn hourly_sales(window: &TimeWindow, offset: ReportingOffset) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT CAST(HOUR(");
    qb.push(local_created_at(offset));
    qb.push(
        ") AS SIGNED) AS hour, \
         COALESCE(SUM(s.total_amount), 0) AS total_amount_sales, \
         COUNT(*) AS number_of_transactions \
         FROM sales s",
    );
    push_sale_filter(&mut qb, SaleStatus::Completed, window);
    qb.push(" GROUP BY hour ORDER BY hour");
    qb
}
