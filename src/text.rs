//! Text utilities

use std::borrow::Cow;

/// Replace every tab in `line` with `replacement`.
#[must_use]
pub fn expand_tabs<'a>(line: &'a str, replacement: &str) -> Cow<'a, str> {
    if line.contains('\t') {
        Cow::Owned(line.replace('\t', replacement))
    } else {
        Cow::Borrowed(line)
    }
}

/// Cut `text` to at most `max_chars` characters; 0 means no limit.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return text;
    }
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Tab expansion followed by truncation, as every encoder does it.
#[must_use]
pub fn prepare_line(line: &str, max_width: usize, tab_replacement: &str) -> String {
    let expanded = expand_tabs(line, tab_replacement);
    truncate_chars(&expanded, max_width).to_string()
}

/// Escape the characters that are significant in HTML text and attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Right-pad `text` with spaces to `width` characters.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut padded = String::with_capacity(text.len() + width - len);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width - len));
    padded
}
