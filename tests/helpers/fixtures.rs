use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use pos_dashboard::modules::reports::models::{SaleLineItem, SaleStatus, SaleTransaction};

/// Shorthand for a UTC instant
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid fixture instant")
}

/// A COMPLETED cash sale by `emp-1` with no cost of goods
pub fn sale(id: &str, created_at: DateTime<Utc>, total: Decimal) -> SaleTransaction {
    SaleTransaction {
        id: id.to_string(),
        created_at,
        status: SaleStatus::Completed,
        total_amount: total,
        cost_of_goods: Decimal::ZERO,
        gross_profit: total,
        payment_method: "CASH".to_string(),
        cashier_id: "emp-1".to_string(),
    }
}

pub fn with_status(mut sale: SaleTransaction, status: SaleStatus) -> SaleTransaction {
    sale.status = status;
    sale
}

pub fn paid_by(mut sale: SaleTransaction, method: &str) -> SaleTransaction {
    sale.payment_method = method.to_string();
    sale
}

pub fn rung_up_by(mut sale: SaleTransaction, cashier_id: &str) -> SaleTransaction {
    sale.cashier_id = cashier_id.to_string();
    sale
}

pub fn with_cost(mut sale: SaleTransaction, cost: Decimal) -> SaleTransaction {
    sale.cost_of_goods = cost;
    sale.gross_profit = sale.total_amount - cost;
    sale
}

pub fn line_item(sale_id: &str, product_id: &str, quantity: i64, price: Decimal) -> SaleLineItem {
    SaleLineItem {
        id: format!("{}-{}", sale_id, product_id),
        sale_id: sale_id.to_string(),
        product_id: product_id.to_string(),
        quantity,
        price_at_sale: price,
        quantity_printed: 0,
    }
}
