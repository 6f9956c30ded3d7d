//! Timestamps: an instant plus the UTC offset it was recorded with.
//!
//! Precision is a rendering choice, not part of the value. [`Timestamp::copy`]
//! produces a truncated copy and [`Timestamp::switch_offset`] keeps the
//! wall-clock fields while replacing the offset (it is not a timezone
//! conversion).
//!
//! ```rust
//! use axion::{Timestamp, TimestampPrecision};
//! use chrono::FixedOffset;
//!
//! let ts: Timestamp = "2023-05-17T10:30:45.123456+02:00".parse().unwrap();
//! let day = ts.copy(TimestampPrecision::Day);
//! assert_eq!(day.to_string(), "2023-05-17T00:00:00.000000+02:00");
//!
//! let utc = ts.switch_offset(FixedOffset::east_opt(0).unwrap());
//! assert_eq!(utc.to_string(), "2023-05-17T10:30:45.123456+00:00");
//! ```

use crate::{Error, Result};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precision used when rendering or truncating a timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TimestampPrecision {
    Year,
    Month,
    Day,
    Minute,
    Second,
    /// Sub-second digits down to the microsecond.
    #[default]
    Millisecond,
}

impl TimestampPrecision {
    pub(crate) const ALL: [TimestampPrecision; 6] = [
        TimestampPrecision::Year,
        TimestampPrecision::Month,
        TimestampPrecision::Day,
        TimestampPrecision::Minute,
        TimestampPrecision::Second,
        TimestampPrecision::Millisecond,
    ];

    /// `true` for precisions whose text form carries a UTC offset.
    #[must_use]
    pub fn has_offset(self) -> bool {
        self >= TimestampPrecision::Minute
    }
}

/// Earliest wall-clock year a timestamp may carry.
pub const MIN_YEAR: i32 = 1;
/// Latest wall-clock year a timestamp may carry; text forms use four year digits.
pub const MAX_YEAR: i32 = 9999;

pub(crate) fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(Error::format(format!(
            "year {} is outside {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )))
    }
}

/// An instant with the offset it was recorded at. The wall-clock year is
/// always within [`MIN_YEAR`]..=[`MAX_YEAR`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// # Errors
    ///
    /// Returns a format error if the wall-clock year is out of range.
    pub fn new(datetime: DateTime<FixedOffset>) -> Result<Self> {
        check_year(datetime.year())?;
        Ok(Timestamp(datetime))
    }

    /// Builds a timestamp from wall-clock fields and an offset in seconds east of UTC.
    ///
    /// # Errors
    ///
    /// Returns a format error if any field, the year included, is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        offset_seconds: i32,
    ) -> Result<Self> {
        check_year(year)?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::format(format!("invalid date {:04}-{:02}-{:02}", year, month, day))
        })?;
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond).ok_or_else(
            || Error::format(format!("invalid time {:02}:{:02}:{:02}", hour, minute, second)),
        )?;
        let offset = FixedOffset::east_opt(offset_seconds)
            .ok_or_else(|| Error::format(format!("invalid UTC offset {}s", offset_seconds)))?;
        Ok(Timestamp::from_local(date.and_time(time), offset))
    }

    /// Interprets `naive` as wall-clock time at `offset`.
    pub(crate) fn from_local(naive: NaiveDateTime, offset: FixedOffset) -> Self {
        let utc = naive - Duration::seconds(i64::from(offset.local_minus_utc()));
        Timestamp(DateTime::from_naive_utc_and_offset(utc, offset))
    }

    /// Interprets `naive` as wall-clock time at the local system offset.
    pub(crate) fn from_local_system(naive: NaiveDateTime) -> Self {
        let offset = Local
            .offset_from_local_datetime(&naive)
            .earliest()
            .map(|offset| offset.fix())
            .unwrap_or_else(|| Local::now().offset().fix());
        Timestamp::from_local(naive, offset)
    }

    #[must_use]
    pub fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// Returns a copy truncated to `precision`; the offset is kept.
    #[must_use]
    pub fn copy(&self, precision: TimestampPrecision) -> Timestamp {
        let local = self.0.naive_local();
        let date = local.date();
        let truncated = match precision {
            TimestampPrecision::Year => NaiveDate::from_yo_opt(date.year(), 1),
            TimestampPrecision::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            _ => Some(date),
        }
        .and_then(|date| {
            let time = local.time();
            let time = match precision {
                TimestampPrecision::Year | TimestampPrecision::Month | TimestampPrecision::Day => {
                    NaiveTime::from_hms_opt(0, 0, 0)
                }
                TimestampPrecision::Minute => NaiveTime::from_hms_opt(time.hour(), time.minute(), 0),
                TimestampPrecision::Second => {
                    NaiveTime::from_hms_opt(time.hour(), time.minute(), time.second())
                }
                TimestampPrecision::Millisecond => NaiveTime::from_hms_nano_opt(
                    time.hour(),
                    time.minute(),
                    time.second(),
                    time.nanosecond() / 1_000 * 1_000,
                ),
            }?;
            Some(date.and_time(time))
        });
        // January 1st and the first of a month always exist, so this never falls back.
        truncated.map_or(*self, |naive| Timestamp::from_local(naive, self.offset()))
    }

    /// Keeps the wall-clock fields and replaces the offset.
    #[must_use]
    pub fn switch_offset(&self, offset: FixedOffset) -> Timestamp {
        Timestamp::from_local(self.0.naive_local(), offset)
    }

    /// The finest precision needed to represent this timestamp without loss.
    #[must_use]
    pub fn precision(&self) -> TimestampPrecision {
        let local = self.0.naive_local();
        if local.nanosecond() != 0 {
            TimestampPrecision::Millisecond
        } else if local.second() != 0 {
            TimestampPrecision::Second
        } else if local.hour() != 0 || local.minute() != 0 {
            TimestampPrecision::Minute
        } else if local.day() != 1 {
            TimestampPrecision::Day
        } else if local.month() != 1 {
            TimestampPrecision::Month
        } else {
            TimestampPrecision::Year
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.6f%:z"))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::format(format!("'{}' is not a valid timestamp: {}", s, e)))
            .and_then(Timestamp::new)
    }
}

impl TryFrom<DateTime<FixedOffset>> for Timestamp {
    type Error = Error;

    fn try_from(datetime: DateTime<FixedOffset>) -> Result<Self> {
        Timestamp::new(datetime)
    }
}
