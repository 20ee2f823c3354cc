use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, ReportingOffset, Result};

/// Years accepted for the monthly trend
pub const MIN_REPORT_YEAR: i32 = 2000;
pub const MAX_REPORT_YEAR: i32 = 2100;

/// Whether the end instant belongs to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
    Inclusive,
    Exclusive,
}

/// Time range a pipeline filters `created_at` on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub end_bound: EndBound,
}

impl TimeWindow {
    /// `[start, end]`; rejects `start > end`
    pub fn inclusive(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AppError::invalid_period(format!(
                "period start ({}) must not be after period end ({})",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }

        Ok(Self {
            start,
            end,
            end_bound: EndBound::Inclusive,
        })
    }

    /// `[start, end)`; rejects `start > end`
    pub fn half_open(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let mut window = Self::inclusive(start, end)?;
        window.end_bound = EndBound::Exclusive;
        Ok(window)
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// The preceding window of equal length, `[start - len, start)`, so the
    /// boundary instant is only ever counted in the current window.
    pub fn previous(&self) -> TimeWindow {
        TimeWindow {
            start: self.start - self.length(),
            end: self.start,
            end_bound: EndBound::Exclusive,
        }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        if t < self.start {
            return false;
        }
        match self.end_bound {
            EndBound::Inclusive => t <= self.end,
            EndBound::Exclusive => t < self.end,
        }
    }
}

/// Calendar unit the dashboard is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl ReportPeriod {
    /// From the start of the current local calendar unit up to `now`, inclusive
    pub fn resolve(&self, now: DateTime<Utc>, offset: ReportingOffset) -> TimeWindow {
        let start = match self {
            ReportPeriod::Day => offset.start_of_day(now),
            ReportPeriod::Week => offset.start_of_week(now),
            ReportPeriod::Month => offset.start_of_month(now),
            ReportPeriod::Year => offset.start_of_year(now),
        };

        TimeWindow {
            start,
            end: now,
            end_bound: EndBound::Inclusive,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportPeriod::Day => write!(f, "day"),
            ReportPeriod::Week => write!(f, "week"),
            ReportPeriod::Month => write!(f, "month"),
            ReportPeriod::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(ReportPeriod::Day),
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            "year" => Ok(ReportPeriod::Year),
            _ => Err(format!("Invalid report period: {}", s)),
        }
    }
}

/// Inputs of one dashboard report
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub period: ReportPeriod,
    /// Explicit inclusive bounds; overrides `period` when present
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub compare_to_previous: bool,
    /// Trend year; defaults to the current local year
    pub year: Option<i32>,
}

impl ReportRequest {
    pub fn for_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            range: Some((start, end)),
            ..Self::default()
        }
    }

    pub fn comparing(mut self) -> Self {
        self.compare_to_previous = true;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// The eleven aggregation pipelines of a report batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubQuery {
    CurrentPeriodStats,
    ItemsSoldTotal,
    PreviousPeriodStats,
    TopProducts,
    MonthlyTrend,
    MonthlyItemsTrend,
    PaymentMethodBreakdown,
    RefundStats,
    SalesByItem,
    SalesByCashier,
    HourlyStats,
}

impl SubQuery {
    pub const ALL: [SubQuery; 11] = [
        SubQuery::CurrentPeriodStats,
        SubQuery::ItemsSoldTotal,
        SubQuery::PreviousPeriodStats,
        SubQuery::TopProducts,
        SubQuery::MonthlyTrend,
        SubQuery::MonthlyItemsTrend,
        SubQuery::PaymentMethodBreakdown,
        SubQuery::RefundStats,
        SubQuery::SalesByItem,
        SubQuery::SalesByCashier,
        SubQuery::HourlyStats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SubQuery::CurrentPeriodStats => "current_period_stats",
            SubQuery::ItemsSoldTotal => "items_sold_total",
            SubQuery::PreviousPeriodStats => "previous_period_stats",
            SubQuery::TopProducts => "top_products",
            SubQuery::MonthlyTrend => "monthly_trend",
            SubQuery::MonthlyItemsTrend => "monthly_items_trend",
            SubQuery::PaymentMethodBreakdown => "payment_method_breakdown",
            SubQuery::RefundStats => "refund_stats",
            SubQuery::SalesByItem => "sales_by_item",
            SubQuery::SalesByCashier => "sales_by_cashier",
            SubQuery::HourlyStats => "hourly_stats",
        }
    }
}

impl fmt::Display for SubQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
