//! Error types for property, duration and date-time parsing.

use thiserror::Error;

/// Errors that can occur while parsing calendar text.
///
/// Every variant is terminal: a failed parse never yields a partial value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The property line has nothing before its first `;` or `:`.
    #[error("property line has an empty name")]
    EmptyName,

    /// Input ended before a `:` closed the name/parameter section.
    #[error("property line has no ':' after its name and parameters")]
    UnterminatedHead,

    /// A parameter in the head has an empty key, lacks `=`, or has an
    /// unterminated quoted value. `offset` is the character offset where
    /// the problem was detected.
    #[error("malformed parameter at offset {offset}: {message}")]
    MalformedParameter { offset: usize, message: String },

    /// The duration literal does not match `[+-]P(nW | [nD][T[nH][nM][nS]])`.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    /// The date-time literal has the wrong shape or out-of-range fields.
    #[error("invalid date-time {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    /// The offset resolver does not know the timezone identifier.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The wall-clock reading falls into a DST gap or fold and the
    /// configured policy refuses to pick an offset.
    #[error("local time {wall_clock} does not map to a single instant in {timezone}")]
    NonexistentLocalTime { timezone: String, wall_clock: String },

    /// A line of a multi-line document failed to parse. `line` is the
    /// 1-based physical line where the logical line starts.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn duration(input: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidDuration {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn date(input: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidDate {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout calparse.
pub type Result<T> = std::result::Result<T, ParseError>;
