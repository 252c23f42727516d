//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// This design is to allow users to distinguish between different redacted strings but avoid
/// leaking sensitive information.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            // Boundaries are in characters, not bytes, so multi-byte
            // input cannot split a code point.
            for c in self.0.chars().take(3) {
                std::fmt::Write::write_char(f, c)?;
            }
            f.write_str("***")?;
            let tail = self
                .0
                .char_indices()
                .rev()
                .nth(2)
                .map(|(i, _)| i)
                .unwrap_or(0);
            f.write_str(&self.0[tail..])
        }
    }
}
