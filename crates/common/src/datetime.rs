//! DateTime utilities.
//!
//! Besides parsing and formatting, this module defines [`DateWindow`], the
//! "recent" selector used by history filters. The reference time is always
//! passed in so filtering stays deterministic.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use codearena_domain::errors::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Get the current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a datetime string into a UTC DateTime.
///
/// Accepts RFC 3339, RFC 2822 and naive `YYYY-MM-DD HH:MM:SS` (read as UTC).
///
/// # Examples
///
/// ```
/// use codearena_common::datetime::parse_datetime;
///
/// let dt = parse_datetime("2023-11-23T14:20:00Z").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2023-11-23T14:20:00+00:00");
/// ```
pub fn parse_datetime(datetime_str: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(datetime_str)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| DateTime::parse_from_rfc2822(datetime_str).map(|dt| dt.with_timezone(&Utc)))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .map_err(|e| format!("Failed to parse datetime '{}': {}", datetime_str, e))
}

/// Format a DateTime as RFC 3339.
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339()
}

/// Format a DateTime in local time for tables.
pub fn format_datetime_display(datetime: &DateTime<Utc>) -> String {
    datetime
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Recency window for date-threshold filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateWindow {
    /// No constraint
    #[default]
    All,
    /// Since local midnight of the reference day
    Today,
    /// The last 7 days
    Week,
    /// The last 30 days
    Month,
}

impl DateWindow {
    /// Earliest accepted instant in the local time zone, or `None` for
    /// [`DateWindow::All`].
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.cutoff_in(now, &Local)
    }

    /// Earliest accepted instant, with "today" measured in `tz`.
    pub fn cutoff_in<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Option<DateTime<Utc>> {
        match self {
            Self::All => None,
            Self::Today => Some(start_of_day(now, tz)),
            Self::Week => Some(now - Duration::days(7)),
            Self::Month => Some(now - Duration::days(30)),
        }
    }

    /// Whether `timestamp` falls inside the window. The boundary is inclusive.
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.contains_in(timestamp, now, &Local)
    }

    /// [`DateWindow::contains`] with an explicit time zone.
    pub fn contains_in<Tz: TimeZone>(
        &self,
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> bool {
        self.cutoff_in(now, tz)
            .map_or(true, |cutoff| timestamp >= cutoff)
    }
}

/// Midnight of `now`'s calendar day in `tz`, as UTC.
fn start_of_day<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let midnight = now
        .with_timezone(tz)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();

    // A DST jump can skip local midnight; fall back to reading it as UTC.
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

impl FromStr for DateWindow {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(QueryError::UnknownDateWindow(s.to_string())),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2023-11-23T14:20:00Z").is_ok());
        assert!(parse_datetime("2023-11-23 14:20:00").is_ok());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_all_window_has_no_cutoff() {
        let now = at("2023-11-23T15:00:00Z");
        assert_eq!(DateWindow::All.cutoff_in(now, &Utc), None);
        assert!(DateWindow::All.contains_in(at("1999-01-01T00:00:00Z"), now, &Utc));
    }

    #[test]
    fn test_today_starts_at_midnight_inclusive() {
        let now = at("2023-11-23T15:00:00Z");
        let window = DateWindow::Today;
        assert_eq!(window.cutoff_in(now, &Utc), Some(at("2023-11-23T00:00:00Z")));
        assert!(window.contains_in(at("2023-11-23T00:00:00Z"), now, &Utc));
        assert!(window.contains_in(at("2023-11-23T14:20:00Z"), now, &Utc));
        assert!(!window.contains_in(at("2023-11-22T23:59:59Z"), now, &Utc));
    }

    #[test]
    fn test_week_and_month_are_rolling() {
        let now = at("2023-11-23T15:00:00Z");
        assert!(DateWindow::Week.contains_in(at("2023-11-16T15:00:00Z"), now, &Utc));
        assert!(!DateWindow::Week.contains_in(at("2023-11-16T14:59:59Z"), now, &Utc));
        assert!(DateWindow::Month.contains_in(at("2023-10-24T15:00:00Z"), now, &Utc));
        assert!(!DateWindow::Month.contains_in(at("2023-10-24T14:59:59Z"), now, &Utc));
    }

    #[test]
    fn test_parse_window() {
        assert_eq!("Week".parse::<DateWindow>().unwrap(), DateWindow::Week);
        assert_eq!(
            "fortnight".parse::<DateWindow>(),
            Err(QueryError::UnknownDateWindow("fortnight".into()))
        );
    }
}
