//! Reserved-character escaping and escape-aware field splitting.
//!
//! TCD lines reserve `;` (top-level field separator), `,` (sub-field
//! separator), `\` (escape lead-in) and the line feed. Free-text payloads run
//! through [`encode`] before being placed in a field and through [`decode`]
//! after being split back out. [`split`] separates fields without being fooled
//! by escaped separators.
//!
//! All functions here are pure and never fail: malformed trailing escapes are
//! treated as truncation, and carriage returns vanish in both directions.

/// Escape reserved characters in a free-text sub-field.
///
/// `\` becomes `\\`, `;` becomes `\;`, `,` becomes `\,` and a line feed
/// becomes `\n`. Carriage returns are dropped silently; they are never
/// escaped and never preserved.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Reverse [`encode`].
///
/// `\n` yields a line feed; `\` followed by any other character yields that
/// character literally. An escape character immediately followed by
/// end-of-string is dropped, and carriage returns are dropped.
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                // Trailing lone escape: tolerated as truncation.
                None => {}
            },
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Split `line` on unescaped occurrences of `delimiter`.
///
/// An escaped delimiter inside a field does not split; the returned fields
/// keep their escape sequences intact so free-text fields can be passed to
/// [`decode`] afterwards. Splitting an empty string yields an empty field
/// list; a string without the delimiter yields a single field.
pub fn split(line: &str, delimiter: char) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut escaped = false;
    for c in line.chars() {
        if escaped {
            field.push(c);
            escaped = false;
        } else if c == '\\' {
            field.push(c);
            escaped = true;
        } else if c == delimiter {
            fields.push(core::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}
