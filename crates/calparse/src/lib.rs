//! # calparse
//!
//! Parsing engine for iCalendar-style text: property lines
//! (`NAME;PARAM=VALUE:VALUE`), duration literals (`PT3H15M`) and date-time
//! literals (`20190531T083000Z`).
//!
//! Every entry point is a pure function over its input. Failures are typed
//! [`ParseError`]s; no partial values are returned.
//!
//! ## Quick start
//!
//! ```rust
//! use calparse::{parse_duration, parse_property, parse_time, PropertyValue};
//!
//! let rule = parse_property("RRULE:FREQ=WEEKLY;BYDAY=SA").unwrap();
//! assert!(matches!(rule.value, PropertyValue::Pairs(ref p) if p.len() == 2));
//!
//! let alarm = parse_duration("-PT15M").unwrap();
//! assert_eq!(alarm.total_seconds(), -900);
//!
//! let start = parse_time("20190531T083000Z", "Europe/Berlin").unwrap();
//! assert_eq!(start.to_rfc3339(), "2019-05-31T08:30:00+00:00");
//! ```
//!
//! ## Modules
//!
//! - [`property`]: property line → token tree
//! - [`normalize`]: token tree → [`PropertyRecord`]
//! - [`escape`]: TEXT escaping and unescaping
//! - [`duration`]: duration literal → [`Duration`]
//! - [`time`]: date-time literal → UTC instant
//! - [`timezone`]: offset resolvers and DST policy
//! - [`lines`]: content-line unfolding and document parsing
//! - [`error`]: error types

mod cursor;

pub mod duration;
pub mod error;
pub mod escape;
pub mod lines;
pub mod normalize;
pub mod property;
pub mod time;
pub mod timezone;

pub use duration::{parse_duration, Duration};
pub use error::ParseError;
pub use escape::{escape_text, unescape_text};
pub use lines::{parse_document, unfold_lines};
pub use normalize::{normalize, parse_property, PropertyRecord, PropertyValue};
pub use property::{parse_property_sequence, Param, ParamBlock, TokenTree, TokenValue};
pub use time::{parse_time, parse_time_with, parse_wall_clock, TimeParser, WallClock};
pub use timezone::{DstPolicy, IanaResolver, OffsetResolver};
