//! Date range handling for the `createdAt` constraint.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};

/// An optional creation-date window.
///
/// The range only constrains anything when both bounds are present; a range
/// with a single bound behaves like no range at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,

    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Creates a range with both bounds set.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Returns both bounds if the range is fully specified.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.from?, self.to?))
    }

    /// Returns true if both bounds are present.
    pub fn is_bounded(&self) -> bool {
        self.bounds().is_some()
    }

    /// Returns true if `timestamp` falls within the range, bounds included.
    ///
    /// A range missing either bound contains every timestamp.
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        match self.bounds() {
            Some((from, to)) => from <= *timestamp && *timestamp <= to,
            None => true,
        }
    }

    /// Checks that the lower bound does not lie after the upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedDateRange`] for an inverted range.
    pub fn validate(&self) -> FilterResult<()> {
        match self.bounds() {
            Some((from, to)) if from > to => Err(FilterError::InvertedDateRange),
            _ => Ok(()),
        }
    }
}

/// Which end of a day a date-only bound resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    /// 00:00:00.000 local time.
    Start,
    /// 23:59:59.999 local time.
    End,
}

/// Returns the last millisecond of `date` in local time.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let next_midnight = date.and_time(NaiveTime::MIN) + chrono::Duration::days(1);
    local_to_utc(next_midnight - chrono::Duration::milliseconds(1))
}

/// Returns the first millisecond of `date` in local time.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN))
}

/// Returns the last millisecond of today in local time.
///
/// Used as the default upper bound of a date range so that responses
/// created later today are still included.
pub fn end_of_today() -> DateTime<Utc> {
    end_of_day(Local::now().date_naive())
}

/// Parses a user supplied date bound.
///
/// Accepts `today`, a `YYYY-MM-DD` date (resolved to the start or end of
/// that local day depending on `bound`) or a full RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`FilterError::InvalidDate`] if the input matches none of these.
pub fn parse_date_bound(input: &str, bound: DayBound) -> FilterResult<DateTime<Utc>> {
    let trimmed = input.trim();

    let date = if trimmed.eq_ignore_ascii_case("today") {
        Some(Local::now().date_naive())
    } else {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
    };

    if let Some(date) = date {
        return Ok(match bound {
            DayBound::Start => start_of_day(date),
            DayBound::End => end_of_day(date),
        });
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| FilterError::invalid_date(input))
}

/// Interprets a naive local datetime, picking the earlier instant when the
/// local clock is ambiguous and falling back to UTC inside a DST gap.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}
