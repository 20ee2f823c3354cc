use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::money;

/// Kind of cash movement in the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Float added or cash deposited
    In,
    /// Payout or cash drop
    Out,
    /// Cash taken at checkout
    Sale,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::In => "IN",
            EntryType::Out => "OUT",
            EntryType::Sale => "SALE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN" => Ok(EntryType::In),
            "OUT" => Ok(EntryType::Out),
            "SALE" => Ok(EntryType::Sale),
            _ => Err(format!("Invalid cash drawer entry type: {}", s)),
        }
    }
}

/// A recorded drawer movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashDrawerEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub cashier_id: String,
    pub note: Option<String>,
}

/// Manual drawer movement submitted by an operator
#[derive(Debug, Clone, Deserialize)]
pub struct NewCashDrawerEntry {
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub cashier_id: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewCashDrawerEntry {
    pub const MAX_NOTE_LEN: usize = 255;

    pub fn validate(&self) -> Result<(), String> {
        if self.entry_type == EntryType::Sale {
            return Err("SALE entries are recorded by checkout, not manually".to_string());
        }

        money::validate_amount(self.amount)?;

        if self.cashier_id.trim().is_empty() {
            return Err("cashier_id must not be empty".to_string());
        }

        if let Some(note) = &self.note {
            if note.chars().count() > Self::MAX_NOTE_LEN {
                return Err(format!("note must be at most {} characters", Self::MAX_NOTE_LEN));
            }
        }

        Ok(())
    }
}

/// Raw per-type totals as summed by the store
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct DrawerTotals {
    pub cash_in: Decimal,
    pub cash_out: Decimal,
    pub cash_sales: Decimal,
    pub entry_count: i64,
}

/// Reconciliation of drawer movements over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerSummary {
    pub cash_in: Decimal,
    pub cash_out: Decimal,
    pub cash_sales: Decimal,
    /// Cash that should be in the drawer: in + sales - out
    pub expected_balance: Decimal,
    pub entry_count: i64,
}

impl From<DrawerTotals> for DrawerSummary {
    fn from(totals: DrawerTotals) -> Self {
        Self {
            expected_balance: totals.cash_in + totals.cash_sales - totals.cash_out,
            cash_in: totals.cash_in,
            cash_out: totals.cash_out,
            cash_sales: totals.cash_sales,
            entry_count: totals.entry_count,
        }
    }
}
