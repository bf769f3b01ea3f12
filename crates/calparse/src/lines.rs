//! Content-line unfolding (RFC 5545 §3.1) and whole-document parsing.

use crate::error::{ParseError, Result};
use crate::normalize::{parse_property, PropertyRecord};

/// Split a document into logical content lines.
///
/// Lines end in CRLF or LF. A line starting with a space or tab continues
/// the previous one; the single leading whitespace character is dropped.
/// Empty lines are skipped.
pub fn unfold_lines(text: &str) -> Vec<String> {
    unfold_numbered(text).into_iter().map(|(_, line)| line).collect()
}

/// Unfold and parse every content line of a document.
///
/// # Errors
/// The first failing line's error, wrapped in [`ParseError::AtLine`].
pub fn parse_document(text: &str) -> Result<Vec<PropertyRecord>> {
    let lines = unfold_numbered(text);
    tracing::trace!(count = lines.len(), "unfolded content lines");
    lines
        .into_iter()
        .map(|(number, line)| {
            parse_property(&line).map_err(|e| ParseError::AtLine {
                line: number,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Logical lines paired with the 1-based physical line they start on.
fn unfold_numbered(text: &str) -> Vec<(usize, String)> {
    let mut out: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(continuation) = raw.strip_prefix([' ', '\t']) {
            if let Some((_, last)) = out.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        if raw.is_empty() {
            continue;
        }
        out.push((idx + 1, raw.to_string()));
    }
    out
}
