use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a sale, owned by checkout; read-only here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleStatus {
    Completed,
    Refunded,
    Voided,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "COMPLETED",
            SaleStatus::Refunded => "REFUNDED",
            SaleStatus::Voided => "VOIDED",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COMPLETED" => Ok(SaleStatus::Completed),
            "REFUNDED" => Ok(SaleStatus::Refunded),
            "VOIDED" => Ok(SaleStatus::Voided),
            _ => Err(format!("Invalid sale status: {}", s)),
        }
    }
}

/// A checkout transaction (`sales` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTransaction {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: SaleStatus,
    pub total_amount: Decimal,
    pub cost_of_goods: Decimal,
    pub gross_profit: Decimal,
    pub payment_method: String,
    pub cashier_id: String,
}

/// One product line of a sale (`sale_items` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub price_at_sale: Decimal,
    pub quantity_printed: i64,
}

impl SaleLineItem {
    pub fn subtotal(&self) -> Decimal {
        self.price_at_sale * Decimal::from(self.quantity)
    }
}
