use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Closed interval of timestamps. Both ends are inclusive, so a record
/// stamped exactly on either boundary is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Fills missing bounds with month-to-date defaults. The asymmetry is
    /// intentional: a missing start falls back to the first of the month,
    /// a missing end to `now`, so the default window grows with the month.
    pub fn or_month_to_date(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            start.unwrap_or_else(|| month_start(now)),
            end.unwrap_or(now),
        )
    }

    /// Fills missing bounds with full-calendar-month defaults, for the
    /// ranking query that judges a whole month at a time.
    pub fn or_calendar_month(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            start.unwrap_or_else(|| month_start(now)),
            end.unwrap_or_else(|| month_end(now)),
        )
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .expect("valid month start")
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight")
        .and_utc()
}

fn month_end(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let next_month_start = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("valid month start")
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight")
        .and_utc();
    next_month_start - Duration::seconds(1)
}
