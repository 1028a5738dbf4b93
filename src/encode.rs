//! Line encoders turn raw file lines into display markup.
//!
//! The renderer only sees [`LineEncoder`]; whatever it returns is placed in
//! the row plan verbatim. Encoders never fail: a highlighter that cannot
//! handle a line falls back to plain output.

use crate::text::{escape_html, prepare_line};

pub trait LineEncoder {
    /// Encode one raw line, expanding tabs to `tab_replacement` and keeping at
    /// most `max_width` characters of source text (0 means unlimited).
    fn encode(&self, line: &str, max_width: usize, tab_replacement: &str) -> String;
}

impl<F> LineEncoder for F
where
    F: Fn(&str, usize, &str) -> String,
{
    fn encode(&self, line: &str, max_width: usize, tab_replacement: &str) -> String {
        self(line, max_width, tab_replacement)
    }
}

/// Unhighlighted encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainEncoder {
    escape_html: bool,
}

impl PlainEncoder {
    /// HTML-escaped output for browser rendering.
    #[must_use]
    pub const fn html() -> Self {
        Self { escape_html: true }
    }

    /// Text output for terminals and logs.
    #[must_use]
    pub const fn text() -> Self {
        Self { escape_html: false }
    }
}

impl Default for PlainEncoder {
    fn default() -> Self {
        Self::html()
    }
}

impl LineEncoder for PlainEncoder {
    fn encode(&self, line: &str, max_width: usize, tab_replacement: &str) -> String {
        let prepared = prepare_line(line, max_width, tab_replacement);
        if self.escape_html {
            escape_html(&prepared)
        } else {
            prepared
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_html_escapes() {
        let encoder = PlainEncoder::html();
        assert_eq!(encoder.encode("\tVec<u8>", 0, "  "), "  Vec&lt;u8&gt;");
    }

    #[test]
    fn test_plain_text_truncates() {
        let encoder = PlainEncoder::text();
        assert_eq!(encoder.encode("a <long> line", 6, "  "), "a <lon");
    }

    #[test]
    fn test_closures_are_encoders() {
        let shout = |line: &str, _: usize, _: &str| line.to_uppercase();
        let encoder: &dyn LineEncoder = &shout;
        assert_eq!(encoder.encode("quiet", 0, ""), "QUIET");
    }
}
