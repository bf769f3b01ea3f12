//! TEXT value escaping (RFC 5545 §3.3.11).

/// Resolve backslash escapes in a TEXT value.
///
/// `\;`, `\,`, `\\` and `\n`/`\N` map to their literal characters. Any other
/// backslash sequence, including a lone trailing backslash, is kept verbatim.
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(';') => out.push(';'),
            Some(',') => out.push(','),
            Some('\\') => out.push('\\'),
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Escape a TEXT value so that [`unescape_text`] restores it exactly.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
