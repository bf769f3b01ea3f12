//! Date-time literals (`20190531T083000Z`, `20190531T083000`, `20190607`).
//!
//! Validation runs in a fixed order so the error reported is always the
//! earliest one:
//!
//! 1. Shape: `YYYYMMDD`, `YYYYMMDDTHHMMSS` or `YYYYMMDDTHHMMSSZ`, digits only
//!    in the numeric positions.
//! 2. Range: month 1-12, day within the month (leap years honored), hour
//!    0-23, minute and second 0-59.
//! 3. Offset: a `Z` literal is UTC and skips the resolver entirely; any other
//!    literal is wall-clock time in the supplied timezone.

use crate::error::{ParseError, Result};
use crate::timezone::{IanaResolver, OffsetResolver};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

const DATE_LEN: usize = 8;
const DATE_TIME_LEN: usize = 15;

/// A shape- and range-checked literal, before any timezone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub datetime: NaiveDateTime,
    /// The literal ended in `Z`.
    pub utc: bool,
    /// The literal had no time part; `datetime` is midnight.
    pub date_only: bool,
}

/// Validate a date-time literal without resolving it to an instant.
///
/// # Errors
/// [`ParseError::InvalidDate`] on a shape or range violation.
pub fn parse_wall_clock(text: &str) -> Result<WallClock> {
    let fail = |reason: String| ParseError::date(text, reason);

    let (body, utc) = match text.strip_suffix('Z') {
        Some(body) => (body, true),
        None => (text, false),
    };
    let bytes = body.as_bytes();
    let date_only = match bytes.len() {
        DATE_LEN if !utc => true,
        DATE_TIME_LEN if bytes[DATE_LEN] == b'T' => false,
        _ => {
            return Err(fail(
                "expected YYYYMMDD, YYYYMMDDTHHMMSS or YYYYMMDDTHHMMSSZ".to_string(),
            ))
        }
    };

    let field = |start: usize, len: usize| -> Result<u32> {
        let digits = &bytes[start..start + len];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(fail(format!("expected {len} digits at position {start}")));
        }
        Ok(digits
            .iter()
            .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0')))
    };

    let year = field(0, 4)?;
    let month = field(4, 2)?;
    let day = field(6, 2)?;
    let (hour, minute, second) = if date_only {
        (0, 0, 0)
    } else {
        (field(9, 2)?, field(11, 2)?, field(13, 2)?)
    };

    if !(1..=12).contains(&month) {
        return Err(fail(format!("month {month:02} is out of range")));
    }
    // `year` has at most four digits, so the cast cannot truncate.
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| fail(format!("day {day:02} is out of range for {year:04}-{month:02}")))?;
    if hour > 23 {
        return Err(fail(format!("hour {hour:02} is out of range")));
    }
    if minute > 59 {
        return Err(fail(format!("minute {minute:02} is out of range")));
    }
    if second > 59 {
        return Err(fail(format!("second {second:02} is out of range")));
    }
    let datetime = date
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| fail("time of day is out of range".to_string()))?;

    Ok(WallClock {
        datetime,
        utc,
        date_only,
    })
}

/// Converts date-time literals to instants through an [`OffsetResolver`].
#[derive(Debug, Clone, Default)]
pub struct TimeParser<R = IanaResolver> {
    resolver: R,
}

impl<R: OffsetResolver> TimeParser<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// See [`parse_time`].
    pub fn parse(&self, text: &str, timezone_id: &str) -> Result<DateTime<Utc>> {
        parse_time_with(text, timezone_id, &self.resolver)
    }
}

/// Parse a date-time literal using the IANA database with the default
/// [`DstPolicy`](crate::DstPolicy).
///
/// ```
/// use calparse::parse_time;
/// use chrono::{TimeZone, Utc};
///
/// let instant = parse_time("20180115T214000", "Europe/Berlin").unwrap();
/// assert_eq!(instant, Utc.with_ymd_and_hms(2018, 1, 15, 20, 40, 0).unwrap());
/// ```
///
/// # Errors
/// - [`ParseError::InvalidDate`] on a shape or range violation.
/// - [`ParseError::UnknownTimezone`] if a non-`Z` literal names an unknown zone.
/// - [`ParseError::NonexistentLocalTime`] only with a rejecting policy.
pub fn parse_time(text: &str, timezone_id: &str) -> Result<DateTime<Utc>> {
    parse_time_with(text, timezone_id, &IanaResolver::new())
}

/// Parse a date-time literal with a caller-supplied offset resolver.
pub fn parse_time_with<R>(text: &str, timezone_id: &str, resolver: &R) -> Result<DateTime<Utc>>
where
    R: OffsetResolver + ?Sized,
{
    tracing::trace!(input = text, timezone = timezone_id, "parsing date-time");
    resolve(text, timezone_id, resolver)
        .inspect_err(|e| tracing::debug!(error = %e, "date-time rejected"))
}

fn resolve<R>(text: &str, timezone_id: &str, resolver: &R) -> Result<DateTime<Utc>>
where
    R: OffsetResolver + ?Sized,
{
    let wall = parse_wall_clock(text)?;
    if wall.utc {
        return Ok(wall.datetime.and_utc());
    }
    let offset = resolver.resolve_offset(timezone_id, wall.datetime)?;
    let utc = wall.datetime - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    Ok(utc.and_utc())
}
