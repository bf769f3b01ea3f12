//! UTC offset resolution for wall-clock readings.
//!
//! [`parse_time`](crate::parse_time) never looks up timezone data itself; it
//! asks an [`OffsetResolver`]. [`IanaResolver`] answers from the `chrono-tz`
//! database. Any `Fn(&str, NaiveDateTime) -> Result<FixedOffset>` also works,
//! which keeps tests and embedded callers free of the tz database.

use crate::error::{ParseError, Result};
use chrono::{FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Looks up the UTC offset in effect for a wall-clock reading.
pub trait OffsetResolver {
    /// # Errors
    /// [`ParseError::UnknownTimezone`] if `timezone_id` is not recognized.
    fn resolve_offset(&self, timezone_id: &str, wall_clock: NaiveDateTime) -> Result<FixedOffset>;
}

impl<F> OffsetResolver for F
where
    F: Fn(&str, NaiveDateTime) -> Result<FixedOffset>,
{
    fn resolve_offset(&self, timezone_id: &str, wall_clock: NaiveDateTime) -> Result<FixedOffset> {
        self(timezone_id, wall_clock)
    }
}

/// How to treat wall-clock readings around DST transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// A reading inside a spring-forward gap uses the offset in effect before
    /// the gap, so 02:30 in a 02:00→03:00 gap becomes 03:30. A reading that
    /// occurs twice in an autumn fold resolves to the earlier instant.
    #[default]
    ShiftForward,
    /// Gap and fold readings fail with [`ParseError::NonexistentLocalTime`].
    Reject,
}

/// Resolver backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaResolver {
    policy: DstPolicy,
}

impl IanaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DstPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DstPolicy {
        self.policy
    }
}

impl OffsetResolver for IanaResolver {
    fn resolve_offset(&self, timezone_id: &str, wall_clock: NaiveDateTime) -> Result<FixedOffset> {
        let tz: Tz = timezone_id
            .parse()
            .map_err(|_| ParseError::UnknownTimezone(timezone_id.to_string()))?;

        let unresolvable = || ParseError::NonexistentLocalTime {
            timezone: timezone_id.to_string(),
            wall_clock: wall_clock.to_string(),
        };

        match (tz.offset_from_local_datetime(&wall_clock), self.policy) {
            (LocalResult::Single(offset), _) => Ok(offset.fix()),
            (LocalResult::Ambiguous(earlier, _), DstPolicy::ShiftForward) => {
                tracing::debug!(timezone = timezone_id, %wall_clock, "ambiguous local time, taking earlier offset");
                Ok(earlier.fix())
            }
            (LocalResult::None, DstPolicy::ShiftForward) => {
                tracing::debug!(timezone = timezone_id, %wall_clock, "local time in DST gap, shifting forward");
                // A day earlier is safely before the transition.
                let before = wall_clock - TimeDelta::days(1);
                Ok(tz.offset_from_utc_datetime(&before).fix())
            }
            (_, DstPolicy::Reject) => Err(unresolvable()),
        }
    }
}
