//! Property sequence parser: one content line into a token tree.
//!
//! A property line has the shape `NAME[;KEY=VALUE]*:VALUE`. The parser keeps
//! the structure it sees and does no interpretation beyond that:
//!
//! - `name` is the run before the first `;` or `:`; its case is preserved.
//! - Parameters are collected in encounter order. A parameter value that starts
//!   with `"` runs to the closing quote and may contain `;` and `:`. An
//!   unquoted value may not contain `"` at all.
//! - Only the first `:` outside a quoted parameter ends the head; the rest of
//!   the line is the value, verbatim.
//! - A value shaped like `KEY=VAL(;KEY=VAL)*` (as in `RRULE`) becomes
//!   [`TokenValue::Pairs`]. A value containing a `:` or a backslash escape is
//!   always [`TokenValue::Text`].
//!
//! Escapes are not resolved here; see [`crate::normalize`].

use crate::cursor::CharCursor;
use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};

/// A `key=value` pair, either a property parameter or one element of a
/// structured value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The parameters between the property name and the `:` separator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamBlock(pub Vec<Param>);

/// The raw value of a property line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Opaque text, escapes still in place.
    Text(String),
    /// A semicolon-delimited `key=value` list.
    Pairs(Vec<Param>),
}

/// Structured form of one property line.
///
/// A property line is usually described as the 4-tuple
/// `(name, params, separator, value)`. The separator between head and value
/// is always `:`, so it is not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTree {
    pub name: String,
    pub params: Option<ParamBlock>,
    pub value: TokenValue,
}

/// Tokenize a single (already unfolded) property line.
///
/// # Errors
/// - [`ParseError::UnterminatedHead`] if no `:` closes the head.
/// - [`ParseError::EmptyName`] if the line starts with `;` or `:`.
/// - [`ParseError::MalformedParameter`] for a parameter without `=`, with an
///   empty key, with an unterminated quoted value, or with a `"` inside an
///   unquoted value.
pub fn parse_property_sequence(line: &str) -> Result<TokenTree> {
    tracing::trace!(len = line.len(), "tokenizing property line");
    let mut cursor = CharCursor::new(line);
    parse_sequence(&mut cursor).inspect_err(|e| tracing::debug!(error = %e, "property line rejected"))
}

fn parse_sequence(cursor: &mut CharCursor) -> Result<TokenTree> {
    let name = cursor.take_until(&[';', ':']);
    if cursor.is_exhausted() {
        return Err(ParseError::UnterminatedHead);
    }
    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }

    let params = if cursor.eat(';') {
        Some(parse_param_block(cursor)?)
    } else {
        None
    };

    if !cursor.eat(':') {
        return Err(ParseError::UnterminatedHead);
    }

    let value = parse_value(cursor);
    Ok(TokenTree {
        name,
        params,
        value,
    })
}

/// Parse `KEY=VALUE(;KEY=VALUE)*` up to (not including) the head's `:`.
fn parse_param_block(cursor: &mut CharCursor) -> Result<ParamBlock> {
    let mut params = Vec::new();
    loop {
        let key_at = cursor.position();
        let key = cursor.take_until(&['=', ';', ':']);
        match cursor.peek() {
            None => return Err(ParseError::UnterminatedHead),
            Some('=') => {}
            Some(_) => {
                return Err(ParseError::MalformedParameter {
                    offset: key_at,
                    message: format!("parameter {key:?} has no '='"),
                })
            }
        }
        if key.is_empty() {
            return Err(ParseError::MalformedParameter {
                offset: key_at,
                message: "parameter has an empty name".to_string(),
            });
        }
        cursor.advance();

        let value = parse_param_value(cursor)?;
        params.push(Param::new(key, value));

        match cursor.peek() {
            Some(';') => {
                cursor.advance();
            }
            Some(':') => return Ok(ParamBlock(params)),
            None => return Err(ParseError::UnterminatedHead),
            Some(other) => {
                return Err(ParseError::MalformedParameter {
                    offset: cursor.position(),
                    message: format!("unexpected {other:?} after quoted value"),
                })
            }
        }
    }
}

fn parse_param_value(cursor: &mut CharCursor) -> Result<String> {
    let quote_at = cursor.position();
    if !cursor.eat('"') {
        let value = cursor.take_until(&[';', ':', '"']);
        if cursor.peek() == Some('"') {
            return Err(ParseError::MalformedParameter {
                offset: cursor.position(),
                message: format!("'\"' inside unquoted value {value:?}"),
            });
        }
        return Ok(value);
    }
    let value = cursor.take_until(&['"']);
    if !cursor.eat('"') {
        return Err(ParseError::MalformedParameter {
            offset: quote_at,
            message: "unterminated quoted value".to_string(),
        });
    }
    Ok(value)
}

/// Classify the rest of the line: try a pair list first, fall back to text.
fn parse_value(cursor: &mut CharCursor) -> TokenValue {
    let start = cursor.position();
    if let Some(pairs) = parse_pair_list(cursor) {
        return TokenValue::Pairs(pairs);
    }
    cursor.restore(start);
    TokenValue::Text(cursor.take_rest())
}

fn parse_pair_list(cursor: &mut CharCursor) -> Option<Vec<Param>> {
    if cursor.is_exhausted() {
        return None;
    }
    let mut pairs = Vec::new();
    loop {
        let key = cursor.take_until(&['=', ';', ':', '\\']);
        if key.is_empty() || !cursor.eat('=') {
            return None;
        }
        let value = cursor.take_until(&[';', ':', '\\']);
        pairs.push(Param::new(key, value));
        match cursor.advance() {
            None => return Some(pairs),
            Some(';') => {}
            Some(_) => return None,
        }
    }
}
