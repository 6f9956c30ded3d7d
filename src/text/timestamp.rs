//! Timestamp text forms, one per precision.
//!
//! | Precision   | Text                               |
//! |-------------|------------------------------------|
//! | Year        | `2023T`                            |
//! | Month       | `2023-05T`                         |
//! | Day         | `2023-05-17`                       |
//! | Minute      | `2023-05-17T10:30+02:00`           |
//! | Second      | `2023-05-17T10:30:45+02:00`        |
//! | Millisecond | `2023-05-17T10:30:45.123456+02:00` |
//!
//! The date-only forms carry no offset, so parsing them attaches the local
//! system offset.

use super::grammar::{symbols, SyntaxNode};
use super::{expect, literal_of};
use crate::options::SerializerContext;
use crate::timestamp::{check_year, Timestamp, TimestampPrecision};
use crate::value::{IonType, Value};
use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate};

const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const MILLISECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Renders `value` at the configured precision.
#[must_use]
pub fn serialize_timestamp(value: &Timestamp, ctx: SerializerContext<'_>) -> String {
    format_timestamp(value, ctx.options().timestamps.timestamp_precision)
}

/// Renders `value` truncated to `precision`.
///
/// ```rust
/// use axion::text::timestamp::format_timestamp;
/// use axion::{Timestamp, TimestampPrecision};
///
/// let ts: Timestamp = "2023-05-17T10:30:45.5+02:00".parse().unwrap();
/// assert_eq!(format_timestamp(&ts, TimestampPrecision::Month), "2023-05T");
/// assert_eq!(format_timestamp(&ts, TimestampPrecision::Minute), "2023-05-17T10:30+02:00");
/// ```
#[must_use]
pub fn format_timestamp(value: &Timestamp, precision: TimestampPrecision) -> String {
    let datetime = value.datetime();
    match precision {
        TimestampPrecision::Year => format!("{:04}T", datetime.year()),
        TimestampPrecision::Month => format!("{:04}-{:02}T", datetime.year(), datetime.month()),
        TimestampPrecision::Day => datetime.format("%Y-%m-%d").to_string(),
        TimestampPrecision::Minute => datetime.format(MINUTE_FORMAT).to_string(),
        TimestampPrecision::Second => datetime.format(SECOND_FORMAT).to_string(),
        TimestampPrecision::Millisecond => datetime.format(MILLISECOND_FORMAT).to_string(),
    }
}

/// The precision a timestamp literal was written at, judged by its shape.
fn precision_of(text: &str) -> TimestampPrecision {
    match text.split_once('T') {
        Some((date, "")) if date.len() == 4 => TimestampPrecision::Year,
        Some((date, "")) if date.len() == 7 => TimestampPrecision::Month,
        None | Some((_, "")) => TimestampPrecision::Day,
        Some((_, time)) if time.contains('.') => TimestampPrecision::Millisecond,
        Some((_, time)) if time.matches(':').count() >= 3 => TimestampPrecision::Second,
        Some((_, time)) if time.ends_with('Z') && time.matches(':').count() == 2 => {
            TimestampPrecision::Second
        }
        Some(_) => TimestampPrecision::Minute,
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, original: &str) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| Error::format(format!("'{}' is not a valid timestamp", original)))
}

/// Parses timestamp literal text in any of the six forms.
///
/// # Errors
///
/// Returns a format error for text that matches none of the forms or names an
/// impossible date.
///
/// ```rust
/// use axion::text::timestamp::parse_timestamp_text;
///
/// let ts = parse_timestamp_text("2023-05-17T10:30Z").unwrap();
/// assert_eq!(ts.offset().local_minus_utc(), 0);
/// assert!(parse_timestamp_text("2023-02-30").is_err());
/// ```
pub fn parse_timestamp_text(text: &str) -> Result<Timestamp> {
    let invalid = || Error::format(format!("'{}' is not a valid timestamp", text));
    let precision = precision_of(text);
    if precision.has_offset() {
        let normalized = match text.strip_suffix('Z') {
            Some(rest) => format!("{}+00:00", rest),
            None => text.to_string(),
        };
        let format = match precision {
            TimestampPrecision::Minute => MINUTE_FORMAT,
            TimestampPrecision::Second => SECOND_FORMAT,
            _ => "%Y-%m-%dT%H:%M:%S%.f%:z",
        };
        let datetime = DateTime::parse_from_str(&normalized, format).map_err(|_| invalid())?;
        return Timestamp::new(datetime);
    }

    let date_text = text.strip_suffix('T').unwrap_or(text);
    let mut fields = date_text.split('-');
    let year: i32 = parse_number(fields.next().ok_or_else(invalid)?, text)?;
    check_year(year)?;
    let month: u32 = match fields.next() {
        Some(month) => parse_number(month, text)?,
        None => 1,
    };
    let day: u32 = match fields.next() {
        Some(day) => parse_number(day, text)?,
        None => 1,
    };
    if fields.next().is_some() {
        return Err(invalid());
    }
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    Ok(Timestamp::from_local_system(midnight))
}

/// # Errors
///
/// Returns [`Error::SymbolMismatch`] unless `node` is an `ion-timestamp` node,
/// and a format error for invalid timestamp text.
pub fn parse_timestamp(node: &SyntaxNode) -> Result<Value> {
    let Some(literal) = literal_of(node, IonType::Timestamp)? else {
        return Ok(Value::null_of(IonType::Timestamp));
    };
    expect(literal, symbols::TIMESTAMP_LITERAL)?;
    Ok(Value::timestamp(parse_timestamp_text(literal.text())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SerializerOptions;
    use crate::text::{parse, serialize};
    use chrono::{Local, Offset, TimeZone, Timelike};

    fn sample() -> Timestamp {
        Timestamp::from_fields(2023, 5, 17, 10, 30, 45, 123_456_789, 2 * 3600).unwrap()
    }

    #[test]
    fn test_each_precision_renders() {
        let ts = sample();
        let rendered: Vec<String> = TimestampPrecision::ALL
            .iter()
            .map(|p| format_timestamp(&ts, *p))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "2023T",
                "2023-05T",
                "2023-05-17",
                "2023-05-17T10:30+02:00",
                "2023-05-17T10:30:45+02:00",
                "2023-05-17T10:30:45.123456+02:00",
            ]
        );
    }

    #[test]
    fn test_offset_precisions_round_trip_to_truncated_copy() {
        let ts = sample();
        for precision in TimestampPrecision::ALL.iter().filter(|p| p.has_offset()) {
            let options = SerializerOptions::new().with_timestamp_precision(*precision);
            let text = serialize(&Value::timestamp(ts), &options);
            let parsed = parse(&text).unwrap();
            let parsed = parsed.as_timestamp().unwrap();
            assert_eq!(*parsed, ts.copy(*precision), "precision {:?}", precision);
            assert_eq!(parsed.offset(), ts.offset());
        }
    }

    #[test]
    fn test_year_precision_attaches_local_offset() {
        let options = SerializerOptions::new().with_timestamp_precision(TimestampPrecision::Year);
        let text = serialize(&Value::timestamp(sample()), &options);
        assert_eq!(text, "2023T");

        let parsed = parse(&text).unwrap();
        let parsed = parsed.as_timestamp().unwrap();
        let local = parsed.datetime().naive_local();
        assert_eq!((local.year(), local.month(), local.day()), (2023, 1, 1));
        assert_eq!((local.hour(), local.minute(), local.second()), (0, 0, 0));

        let expected_offset = Local
            .offset_from_local_datetime(&local)
            .earliest()
            .map(|o| o.fix());
        assert_eq!(Some(parsed.offset()), expected_offset);
    }

    #[test]
    fn test_day_accepts_trailing_t() {
        let plain = parse_timestamp_text("2023-05-17").unwrap();
        let with_t = parse_timestamp_text("2023-05-17T").unwrap();
        assert_eq!(plain, with_t);
        assert_eq!(plain.datetime().naive_local().day(), 17);
    }

    #[test]
    fn test_zulu_and_fraction_forms() {
        let second = parse_timestamp_text("2023-05-17T10:30:45Z").unwrap();
        assert_eq!(second.datetime().naive_local().second(), 45);
        assert_eq!(second.offset().local_minus_utc(), 0);

        let fraction = parse_timestamp_text("2023-05-17T10:30:45.5-05:00").unwrap();
        assert_eq!(fraction.datetime().nanosecond(), 500_000_000);
        assert_eq!(fraction.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_boundary_years_round_trip() {
        let first = Timestamp::from_fields(1, 1, 1, 0, 0, 0, 0, 0).unwrap();
        let last = Timestamp::from_fields(9999, 12, 31, 23, 59, 59, 999_999_000, 0).unwrap();
        for ts in [first, last] {
            let text = serialize(&Value::timestamp(ts), &SerializerOptions::new());
            assert_eq!(*parse(&text).unwrap().as_timestamp().unwrap(), ts, "{}", text);
        }
        assert_eq!(format_timestamp(&first, TimestampPrecision::Day), "0001-01-01");
    }

    #[test]
    fn test_year_zero_is_rejected() {
        assert!(parse_timestamp_text("0000T").is_err());
        assert!(parse_timestamp_text("0000-01-01T00:00Z").is_err());
    }

    #[test]
    fn test_precision_of_shapes() {
        assert_eq!(precision_of("2023T"), TimestampPrecision::Year);
        assert_eq!(precision_of("2023-05T"), TimestampPrecision::Month);
        assert_eq!(precision_of("2023-05-17"), TimestampPrecision::Day);
        assert_eq!(precision_of("2023-05-17T10:30Z"), TimestampPrecision::Minute);
        assert_eq!(precision_of("2023-05-17T10:30:00Z"), TimestampPrecision::Second);
        assert_eq!(precision_of("2023-05-17T10:30:00+01:00"), TimestampPrecision::Second);
        assert_eq!(precision_of("2023-05-17T10:30+01:00"), TimestampPrecision::Minute);
    }
}
