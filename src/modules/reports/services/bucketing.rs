use std::cmp::Ordering;

use tracing::warn;

use crate::modules::reports::models::{
    HourlyBucket, HourlySalesRow, MonthlyBucket, MonthlyItemsRow, MonthlySalesRow, ProductSales,
};

pub const MONTHS_PER_YEAR: usize = 12;
pub const HOURS_PER_DAY: usize = 24;

/// Merge grouped monthly rows into exactly twelve buckets, months 1-12 in
/// order. Months the store returned nothing for stay at zero.
pub fn fill_months(sales: Vec<MonthlySalesRow>, items: Vec<MonthlyItemsRow>) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = (1..=MONTHS_PER_YEAR as u32)
        .map(MonthlyBucket::empty)
        .collect();

    for row in sales {
        match slot(row.month, 1, MONTHS_PER_YEAR) {
            Some(idx) => {
                buckets[idx].total_amount_sales += row.total_amount_sales;
                buckets[idx].number_of_transactions += row.number_of_transactions;
            }
            None => warn!(month = row.month, "Discarding sales row outside 1-12"),
        }
    }

    for row in items {
        match slot(row.month, 1, MONTHS_PER_YEAR) {
            Some(idx) => buckets[idx].items_sold += row.items_sold,
            None => warn!(month = row.month, "Discarding items row outside 1-12"),
        }
    }

    buckets
}

/// Merge grouped hourly rows into exactly twenty-four buckets, hours 0-23
pub fn fill_hours(rows: Vec<HourlySalesRow>) -> Vec<HourlyBucket> {
    let mut buckets: Vec<HourlyBucket> = (0..HOURS_PER_DAY as u32)
        .map(HourlyBucket::empty)
        .collect();

    for row in rows {
        match slot(row.hour, 0, HOURS_PER_DAY) {
            Some(idx) => {
                buckets[idx].total_amount_sales += row.total_amount_sales;
                buckets[idx].number_of_transactions += row.number_of_transactions;
            }
            None => warn!(hour = row.hour, "Discarding sales row outside 0-23"),
        }
    }

    buckets
}

/// Zero-based index of a reported bucket number, if it is in range
fn slot(value: i64, first: i64, count: usize) -> Option<usize> {
    let idx = usize::try_from(value - first).ok()?;
    (idx < count).then_some(idx)
}

/// Highest quantity first; equal quantities by ascending product id
pub fn compare_products(a: &ProductSales, b: &ProductSales) -> Ordering {
    b.total_quantity
        .cmp(&a.total_quantity)
        .then_with(|| a.product_id.cmp(&b.product_id))
}

/// Sort with `compare_products` and keep at most `limit` entries
pub fn rank_products(mut rows: Vec<ProductSales>, limit: Option<usize>) -> Vec<ProductSales> {
    rows.sort_by(compare_products);
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}
