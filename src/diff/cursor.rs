//! Forward-only line readers

/// A source of text lines read strictly front to back.
pub trait LineSource {
    /// The next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_line(&mut self) -> Option<String> {
        (**self).read_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn read_line(&mut self) -> Option<String> {
        (**self).read_line()
    }
}

/// Lines of an in-memory text buffer. `\n` and `\r\n` both terminate lines.
#[derive(Debug, Clone)]
pub struct TextLines<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> TextLines<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }
}

impl LineSource for TextLines<'_> {
    fn read_line(&mut self) -> Option<String> {
        self.lines.next().map(str::to_owned)
    }
}

/// Number of lines a [`TextLines`] over `text` yields.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.lines().count()
}

/// Stateful reader that tracks the number of the line it last returned.
///
/// Never rewinds; once the source is exhausted it stays exhausted.
#[derive(Debug)]
pub struct LineCursor<S> {
    source: S,
    line_number: usize,
    current: Option<String>,
    exhausted: bool,
}

impl<S: LineSource> LineCursor<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            line_number: 0,
            current: None,
            exhausted: false,
        }
    }

    /// Move to the next line and return it.
    pub fn advance(&mut self) -> Option<&str> {
        if self.exhausted {
            return None;
        }
        self.current = self.source.read_line();
        if self.current.is_some() {
            self.line_number += 1;
        } else {
            self.exhausted = true;
        }
        self.current.as_deref()
    }

    /// Number of the current line; 0 before the first advance.
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Number the next successful advance will report.
    pub const fn next_line_number(&self) -> usize {
        self.line_number + 1
    }

    /// Text of the current line, `None` before the first advance and at EOF.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<'a> LineCursor<TextLines<'a>> {
    #[must_use]
    pub fn over_text(text: &'a str) -> Self {
        Self::new(TextLines::new(text))
    }
}
