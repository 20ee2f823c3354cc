use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Clock, Result, WritePolicy};
use crate::modules::cash_drawer::models::{CashDrawerEntry, DrawerSummary, NewCashDrawerEntry};
use crate::modules::cash_drawer::repositories::CashDrawerRepository;
use crate::modules::reports::models::TimeWindow;

/// Records manual drawer movements and reconciles the drawer
pub struct CashDrawerService {
    repo: Arc<dyn CashDrawerRepository>,
    write_policy: Arc<dyn WritePolicy>,
    clock: Arc<dyn Clock>,
}

impl CashDrawerService {
    pub fn new(
        repo: Arc<dyn CashDrawerRepository>,
        write_policy: Arc<dyn WritePolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            write_policy,
            clock,
        }
    }

    /// Record an IN or OUT movement.
    ///
    /// # Errors
    /// `WriteDisabled` when the write policy denies writes (checked before
    /// anything else), `Validation` for malformed entries.
    pub async fn record_entry(&self, new_entry: NewCashDrawerEntry) -> Result<CashDrawerEntry> {
        self.write_policy.ensure_write_allowed()?;
        new_entry.validate().map_err(AppError::validation)?;

        let entry = CashDrawerEntry {
            id: Uuid::new_v4().to_string(),
            created_at: self.clock.now(),
            entry_type: new_entry.entry_type,
            amount: new_entry.amount,
            cashier_id: new_entry.cashier_id.trim().to_string(),
            note: new_entry.note,
        };

        self.repo.insert(&entry).await?;

        info!(
            entry_id = %entry.id,
            entry_type = %entry.entry_type,
            amount = %entry.amount,
            cashier_id = %entry.cashier_id,
            "Cash drawer entry recorded"
        );

        Ok(entry)
    }

    /// Reconcile the drawer over `[start, end]`
    pub async fn summarize(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cashier_id: Option<&str>,
    ) -> Result<DrawerSummary> {
        let window = TimeWindow::inclusive(start, end)?;
        self.repo.summarize(&window, cashier_id).await
    }
}
