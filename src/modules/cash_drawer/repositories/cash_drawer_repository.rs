use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result};
use crate::modules::cash_drawer::models::{CashDrawerEntry, DrawerSummary, DrawerTotals};
use crate::modules::reports::models::TimeWindow;
use crate::modules::reports::repositories::pipeline::push_window;

/// Storage of drawer movements
#[async_trait]
pub trait CashDrawerRepository: Send + Sync {
    async fn insert(&self, entry: &CashDrawerEntry) -> Result<()>;

    /// Per-type totals in the window, optionally for a single cashier
    async fn summarize(
        &self,
        window: &TimeWindow,
        cashier_id: Option<&str>,
    ) -> Result<DrawerSummary>;
}

pub struct MySqlCashDrawerRepository {
    pool: MySqlPool,
}

impl MySqlCashDrawerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Totals pipeline over `cash_drawer_entries`
pub fn summary_query(
    window: &TimeWindow,
    cashier_id: Option<&str>,
) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(
        "SELECT \
         COALESCE(SUM(CASE WHEN c.entry_type = 'IN' THEN c.amount ELSE 0 END), 0) AS cash_in, \
         COALESCE(SUM(CASE WHEN c.entry_type = 'OUT' THEN c.amount ELSE 0 END), 0) AS cash_out, \
         COALESCE(SUM(CASE WHEN c.entry_type = 'SALE' THEN c.amount ELSE 0 END), 0) AS cash_sales, \
         COUNT(*) AS entry_count \
         FROM cash_drawer_entries c WHERE ",
    );
    push_window(&mut qb, "c.created_at", window);
    if let Some(cashier_id) = cashier_id {
        qb.push(" AND c.cashier_id = ").push_bind(cashier_id.to_string());
    }
    qb
}

#[async_trait]
impl CashDrawerRepository for MySqlCashDrawerRepository {
    async fn insert(&self, entry: &CashDrawerEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cash_drawer_entries (id, created_at, entry_type, amount, cashier_id, note)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.created_at)
        .bind(entry.entry_type.as_str())
        .bind(entry.amount)
        .bind(&entry.cashier_id)
        .bind(&entry.note)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to record cash drawer entry: {}", e)))?;

        Ok(())
    }

    async fn summarize(
        &self,
        window: &TimeWindow,
        cashier_id: Option<&str>,
    ) -> Result<DrawerSummary> {
        let mut qb = summary_query(window, cashier_id);
        let totals = qb
            .build_query_as::<DrawerTotals>()
            .fetch_one(&self.pool)
            .await?;

        Ok(DrawerSummary::from(totals))
    }
}
