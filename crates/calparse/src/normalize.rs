//! Property normalizer: token tree into a flat [`PropertyRecord`].

use crate::error::Result;
use crate::escape::{escape_text, unescape_text};
use crate::property::{parse_property_sequence, Param, TokenTree, TokenValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The value of a normalized property.
///
/// Serializes untagged: text as a JSON string, pairs as an array of
/// `{"name", "value"}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Text with escapes resolved.
    Text(String),
    /// A structured `key=value` list such as an `RRULE`, in source order.
    Pairs(Vec<Param>),
}

/// A parsed property line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    /// Parameters by key. Empty when the line had none; a repeated key keeps
    /// its last value.
    pub params: BTreeMap<String, String>,
    pub value: PropertyValue,
}

/// Flatten a token tree into a [`PropertyRecord`].
pub fn normalize(tree: TokenTree) -> PropertyRecord {
    let params = tree
        .params
        .map(|block| {
            block
                .0
                .into_iter()
                .map(|p| (p.name, p.value))
                .collect::<BTreeMap<_, _>>()
        })
        .unwrap_or_default();

    let value = match tree.value {
        TokenValue::Text(raw) => PropertyValue::Text(unescape_text(&raw)),
        TokenValue::Pairs(pairs) => PropertyValue::Pairs(pairs),
    };

    PropertyRecord {
        name: tree.name,
        params,
        value,
    }
}

/// Parse one unfolded property line into a [`PropertyRecord`].
///
/// ```
/// use calparse::parse_property;
///
/// let record = parse_property(r"SUMMARY;LANGUAGE=en:Lunch\; then coffee").unwrap();
/// assert_eq!(record.name, "SUMMARY");
/// assert_eq!(record.param("LANGUAGE"), Some("en"));
/// assert_eq!(record.text(), Some("Lunch; then coffee"));
/// ```
pub fn parse_property(line: &str) -> Result<PropertyRecord> {
    parse_property_sequence(line).map(normalize)
}

impl PropertyRecord {
    /// The value as text, if it is not a pair list.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Pairs(_) => None,
        }
    }

    /// The value as a pair list, if it is one.
    pub fn pairs(&self) -> Option<&[Param]> {
        match &self.value {
            PropertyValue::Pairs(pairs) => Some(pairs),
            PropertyValue::Text(_) => None,
        }
    }

    /// Exact-case parameter lookup.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// ASCII case-insensitive parameter lookup. When several keys differ only
    /// by case, the lexicographically last one wins.
    pub fn param_ignore_case(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// ASCII case-insensitive comparison of the property name.
    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Serialize back into a property line.
    ///
    /// Parameters come out sorted by key. Parameter values containing `:`,
    /// `;` or `,` are double-quoted. Text values are escaped.
    ///
    /// Every record returned by [`parse_property`] parses back to itself.
    /// Hand-built records have two limits: a parameter value containing `"`
    /// has no representation, and a text value shaped like `KEY=VAL` with
    /// no character that needs escaping comes back as [`PropertyValue::Pairs`].
    pub fn to_line(&self) -> String {
        let mut line = self.name.clone();
        for (key, value) in &self.params {
            line.push(';');
            line.push_str(key);
            line.push('=');
            if value.contains([':', ';', ',']) {
                line.push('"');
                line.push_str(value);
                line.push('"');
            } else {
                line.push_str(value);
            }
        }
        line.push(':');
        match &self.value {
            PropertyValue::Text(text) => line.push_str(&escape_text(text)),
            PropertyValue::Pairs(pairs) => {
                let joined: Vec<String> = pairs
                    .iter()
                    .map(|p| format!("{}={}", p.name, p.value))
                    .collect();
                line.push_str(&joined.join(";"));
            }
        }
        line
    }
}
