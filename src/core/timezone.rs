use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};

/// Store-local fixed offset used for calendar boundaries and time buckets.
/// All timestamps are stored as UTC; only bucketing happens in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingOffset {
    offset: FixedOffset,
}

impl ReportingOffset {
    /// Largest offset in use anywhere (UTC+14 / UTC-12 fits inside)
    pub const MAX_MINUTES: i32 = 14 * 60;

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn from_minutes(minutes: i32) -> Result<Self, String> {
        if minutes.unsigned_abs() > Self::MAX_MINUTES.unsigned_abs() {
            return Err(format!(
                "UTC offset must be within ±{} minutes, got {}",
                Self::MAX_MINUTES,
                minutes
            ));
        }

        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| format!("Invalid UTC offset: {} minutes", minutes))
    }

    /// Offset in minutes east of UTC, as bound into bucketing queries
    pub fn minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    pub fn to_local(&self, utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc_time.with_timezone(&self.offset)
    }

    /// UTC instant of local midnight on `date`
    pub fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::MIN);
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc)
    }

    pub fn start_of_day(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        self.local_midnight(self.to_local(t).date_naive())
    }

    /// Weeks start on Monday
    pub fn start_of_week(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let date = self.to_local(t).date_naive();
        let days_back = i64::from(date.weekday().num_days_from_monday());
        self.local_midnight(date - Duration::days(days_back))
    }

    pub fn start_of_month(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let date = self.to_local(t).date_naive();
        self.local_midnight(date.with_day(1).unwrap_or(date))
    }

    pub fn start_of_year(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let date = self.to_local(t).date_naive();
        self.local_midnight(date.with_ordinal(1).unwrap_or(date))
    }

    pub fn local_year(&self, t: DateTime<Utc>) -> i32 {
        self.to_local(t).year()
    }

    /// Half-open `[Jan 1 year, Jan 1 year+1)` in UTC
    pub fn year_bounds(&self, year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
        Some((self.local_midnight(start), self.local_midnight(end)))
    }
}

impl Default for ReportingOffset {
    fn default() -> Self {
        Self::utc()
    }
}
