//! Duration literals (RFC 5545 §3.3.6): `P8W`, `PT3H15M`, `-P1DT12H`.
//!
//! Grammar accepted by [`parse_duration`]:
//!
//! ```text
//! duration = [ "+" / "-" ] "P" ( weeks / [ days ] [ "T" time ] )
//! weeks    = 1*DIGIT "W"                        ; nothing may follow
//! days     = 1*DIGIT "D"
//! time     = [ 1*DIGIT "H" ] [ 1*DIGIT "M" ] [ 1*DIGIT "S" ]   ; at least one
//! ```
//!
//! At least one component is required, so `P` and `PT` are rejected. The sign
//! applies to the whole duration; components are unsigned.

use crate::cursor::CharCursor;
use crate::error::{ParseError, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// A parsed duration literal.
///
/// Components keep the shape of the literal: `PT90M` has `minute: Some(90)`
/// and nothing else. `week` never coexists with the other components, and
/// deserialization enforces the same rules as [`parse_duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DurationFields")]
pub struct Duration {
    pub positive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<u32>,
}

/// Unchecked wire form of [`Duration`].
#[derive(Deserialize)]
struct DurationFields {
    positive: bool,
    #[serde(default)]
    week: Option<u32>,
    #[serde(default)]
    day: Option<u32>,
    #[serde(default)]
    hour: Option<u32>,
    #[serde(default)]
    minute: Option<u32>,
    #[serde(default)]
    second: Option<u32>,
}

impl TryFrom<DurationFields> for Duration {
    type Error = String;

    fn try_from(f: DurationFields) -> std::result::Result<Self, Self::Error> {
        let day_time = [f.day, f.hour, f.minute, f.second];
        let has_day_time = day_time.iter().any(Option::is_some);
        if f.week.is_some() && has_day_time {
            return Err("weeks cannot be combined with other components".to_string());
        }
        if f.week.is_none() && !has_day_time {
            return Err("duration has no components".to_string());
        }
        Ok(Duration {
            positive: f.positive,
            week: f.week,
            day: f.day,
            hour: f.hour,
            minute: f.minute,
            second: f.second,
        })
    }
}

impl Duration {
    fn empty(positive: bool) -> Self {
        Self {
            positive,
            week: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
        }
    }

    /// Signed length in seconds. A week is 7 days and a day 24 hours.
    pub fn total_seconds(&self) -> i64 {
        let part = |n: Option<u32>, unit: i64| i64::from(n.unwrap_or(0)) * unit;
        let total = part(self.week, SECONDS_PER_WEEK)
            + part(self.day, SECONDS_PER_DAY)
            + part(self.hour, SECONDS_PER_HOUR)
            + part(self.minute, SECONDS_PER_MINUTE)
            + part(self.second, 1);
        if self.positive {
            total
        } else {
            -total
        }
    }

    /// Exact signed `chrono` delta, for offsetting alarm triggers and event ends.
    pub fn to_time_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.total_seconds())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.positive {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        if let Some(w) = self.week {
            return write!(f, "{w}W");
        }
        if let Some(d) = self.day {
            write!(f, "{d}D")?;
        }
        if self.hour.is_some() || self.minute.is_some() || self.second.is_some() {
            f.write_str("T")?;
            if let Some(h) = self.hour {
                write!(f, "{h}H")?;
            }
            if let Some(m) = self.minute {
                write!(f, "{m}M")?;
            }
            if let Some(s) = self.second {
                write!(f, "{s}S")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s)
    }
}

/// Parse a duration literal such as `PT3H15M` or `-P8W`.
///
/// # Errors
/// Returns [`ParseError::InvalidDuration`] for any grammar violation: missing
/// `P`, a week count combined with other components, components out of
/// order, a number without designator, trailing characters, or no
/// components at all.
pub fn parse_duration(text: &str) -> Result<Duration> {
    tracing::trace!(input = text, "parsing duration");
    scan(text).inspect_err(|e| tracing::debug!(error = %e, "duration rejected"))
}

fn scan(text: &str) -> Result<Duration> {
    let fail = |reason: String| ParseError::duration(text, reason);
    let mut cursor = CharCursor::new(text);

    let positive = if cursor.eat('-') {
        false
    } else {
        cursor.eat('+');
        true
    };
    if !cursor.eat('P') {
        return Err(fail("expected 'P'".to_string()));
    }

    let mut duration = Duration::empty(positive);

    if cursor.peek() != Some('T') {
        let n = read_number(&mut cursor, text)?;
        match cursor.advance() {
            Some('W') => {
                if !cursor.is_exhausted() {
                    return Err(fail(
                        "weeks cannot be combined with other components".to_string(),
                    ));
                }
                duration.week = Some(n);
                return Ok(duration);
            }
            Some('D') => duration.day = Some(n),
            Some(other) => return Err(fail(format!("unexpected designator {other:?}"))),
            None => return Err(fail("number without designator".to_string())),
        }
    }

    if cursor.eat('T') {
        let mut allowed: &[char] = &['H', 'M', 'S'];
        if cursor.is_exhausted() {
            return Err(fail("'T' must be followed by hours, minutes or seconds".to_string()));
        }
        while !cursor.is_exhausted() {
            let n = read_number(&mut cursor, text)?;
            let designator = cursor
                .advance()
                .ok_or_else(|| fail("number without designator".to_string()))?;
            let idx = allowed
                .iter()
                .position(|&d| d == designator)
                .ok_or_else(|| fail(format!("unexpected designator {designator:?} after 'T'")))?;
            match designator {
                'H' => duration.hour = Some(n),
                'M' => duration.minute = Some(n),
                _ => duration.second = Some(n),
            }
            allowed = &allowed[idx + 1..];
        }
    }

    if !cursor.is_exhausted() {
        return Err(fail(format!("unexpected trailing {:?}", cursor.take_rest())));
    }
    Ok(duration)
}

fn read_number(cursor: &mut CharCursor, text: &str) -> Result<u32> {
    let digits = cursor.take_digits();
    if digits.is_empty() {
        return Err(ParseError::duration(text, "expected a number"));
    }
    digits
        .parse()
        .map_err(|_| ParseError::duration(text, format!("component {digits} is too large")))
}
