//! Normal-format diff parser
//!
//! Parses the "normal" output of line-oriented diff utilities (`2c2`,
//! `< old`, `---`, `> new`) into structured hunk records. The tokenizer is
//! the only place that pattern-matches raw diff text; both the patched-text
//! reader and the segment classifier consume its [`Hunk`] records.

use tracing::{debug, warn};

/// Emitted by diff tools when a file lacks a trailing newline.
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Separates the removed and added groups of a change hunk.
pub const CHANGE_SEPARATOR: &str = "---";

/// Directive letter of a hunk header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkOp {
    Add,
    Delete,
    Change,
}

impl HunkOp {
    const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(Self::Add),
            'd' => Some(Self::Delete),
            'c' => Some(Self::Change),
            _ => None,
        }
    }
}

/// A parsed hunk header line, e.g. `5,7c5,6`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub op: HunkOp,
    /// First base line named by the header (1-based; 0 for an add at the top)
    pub base_start: usize,
    /// Last base line named by the header (equals `base_start` without a range)
    pub base_end: usize,
}

impl HunkHeader {
    /// Parse `<start>[,<end>]<op><trailing>`.
    ///
    /// Returns `None` for anything that does not have that shape, which
    /// callers treat as the end of the hunk stream.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (base_start, rest) = split_number(line)?;
        let (base_end, rest) = match rest.strip_prefix(',') {
            Some(after) => split_number(after)?,
            None => (base_start, rest),
        };
        let op = HunkOp::from_char(rest.chars().next()?)?;

        if base_end < base_start || (op != HunkOp::Add && base_start == 0) {
            return None;
        }
        // An add after the last representable line has no effect line.
        if op == HunkOp::Add && base_start == usize::MAX {
            return None;
        }

        Some(Self {
            op,
            base_start,
            base_end,
        })
    }

    /// The 1-based base line at which this hunk begins to apply.
    ///
    /// An add inserts after `base_start`; deletes and changes start at it.
    #[must_use]
    pub const fn effect_line(&self) -> usize {
        match self.op {
            HunkOp::Add => self.base_start + 1,
            HunkOp::Delete | HunkOp::Change => self.base_start,
        }
    }

    /// Number of base lines the header claims the hunk removes.
    #[must_use]
    pub const fn declared_base_count(&self) -> usize {
        match self.op {
            HunkOp::Add => 0,
            HunkOp::Delete | HunkOp::Change => self.base_end - self.base_start + 1,
        }
    }
}

fn split_number(s: &str) -> Option<(usize, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = s[..digits].parse().ok()?;
    Some((value, &s[digits..]))
}

/// Classification of a single raw line of hunk text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkLine<'a> {
    Header(HunkHeader),
    /// `< text`: a base line removed by the hunk
    Removed(&'a str),
    /// `> text`: a line inserted by the hunk
    Added(&'a str),
    /// `---` between the removed and added groups
    Separator,
    NoNewlineMarker,
    Unrecognized,
}

impl<'a> HunkLine<'a> {
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        if line == NO_NEWLINE_MARKER {
            return Self::NoNewlineMarker;
        }
        if line == CHANGE_SEPARATOR {
            return Self::Separator;
        }
        if let Some(text) = line.strip_prefix("< ") {
            return Self::Removed(text);
        }
        if let Some(text) = line.strip_prefix("> ") {
            return Self::Added(text);
        }
        // Blank lines under --suppress-blank-empty lose the trailing space.
        match line {
            "<" => return Self::Removed(""),
            ">" => return Self::Added(""),
            _ => {}
        }
        HunkHeader::parse(line).map_or(Self::Unrecognized, Self::Header)
    }
}

/// One contiguous add/delete/change directive with its content lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub header: HunkHeader,
    /// Text of the `< ` lines, prefix stripped
    pub removed_lines: Vec<String>,
    /// Text of the `> ` lines, prefix stripped
    pub added_lines: Vec<String>,
}

impl Hunk {
    #[must_use]
    pub const fn new(header: HunkHeader) -> Self {
        Self {
            header,
            removed_lines: Vec::new(),
            added_lines: Vec::new(),
        }
    }

    #[must_use]
    pub const fn op(&self) -> HunkOp {
        self.header.op
    }

    #[must_use]
    pub const fn effect_line(&self) -> usize {
        self.header.effect_line()
    }

    /// Base lines actually listed by the hunk.
    #[must_use]
    pub fn base_count(&self) -> usize {
        self.removed_lines.len()
    }

    /// Lines the hunk inserts.
    #[must_use]
    pub fn diff_count(&self) -> usize {
        self.added_lines.len()
    }
}

/// Where the tokenizer is within the hunk stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerState {
    /// Expecting a header
    Idle,
    /// Header read; collecting the removed group
    InHeader(Hunk),
    /// Collecting the added group
    InBody(Hunk),
    /// Input exhausted or a line broke the grammar
    Done,
}

/// Turns raw hunk text into a stream of [`Hunk`] records.
///
/// A line that fits no production ends the stream; whatever hunk was in
/// progress is still yielded.
#[derive(Debug, Clone)]
pub struct HunkTokenizer<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
    state: TokenizerState,
}

impl<'a> HunkTokenizer<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
            state: TokenizerState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &TokenizerState {
        &self.state
    }

    fn finish(hunk: Hunk) -> Hunk {
        let declared = hunk.header.declared_base_count();
        if declared != hunk.base_count() {
            warn!(
                base_start = hunk.header.base_start,
                declared,
                listed = hunk.base_count(),
                "hunk header disagrees with its removed lines"
            );
        }
        hunk
    }
}

impl Iterator for HunkTokenizer<'_> {
    type Item = Hunk;

    fn next(&mut self) -> Option<Hunk> {
        loop {
            if self.state == TokenizerState::Done {
                return None;
            }

            let Some(line) = self.lines.next() else {
                return match std::mem::replace(&mut self.state, TokenizerState::Done) {
                    TokenizerState::InHeader(hunk) | TokenizerState::InBody(hunk) => {
                        Some(Self::finish(hunk))
                    }
                    TokenizerState::Idle | TokenizerState::Done => None,
                };
            };
            self.line_no += 1;

            let parsed = HunkLine::classify(line);
            if parsed == HunkLine::NoNewlineMarker {
                continue;
            }

            match (std::mem::replace(&mut self.state, TokenizerState::Done), parsed) {
                (TokenizerState::Idle, HunkLine::Header(header)) => {
                    self.state = TokenizerState::InHeader(Hunk::new(header));
                }
                (TokenizerState::InHeader(mut hunk), HunkLine::Removed(text)) => {
                    hunk.removed_lines.push(text.to_string());
                    self.state = TokenizerState::InHeader(hunk);
                }
                (
                    TokenizerState::InHeader(hunk) | TokenizerState::InBody(hunk),
                    HunkLine::Separator,
                ) => {
                    self.state = TokenizerState::InBody(hunk);
                }
                (
                    TokenizerState::InHeader(mut hunk) | TokenizerState::InBody(mut hunk),
                    HunkLine::Added(text),
                ) => {
                    hunk.added_lines.push(text.to_string());
                    self.state = TokenizerState::InBody(hunk);
                }
                (
                    TokenizerState::InHeader(hunk) | TokenizerState::InBody(hunk),
                    HunkLine::Header(next),
                ) => {
                    self.state = TokenizerState::InHeader(Hunk::new(next));
                    return Some(Self::finish(hunk));
                }
                (TokenizerState::InHeader(hunk) | TokenizerState::InBody(hunk), _) => {
                    debug!(line_no = self.line_no, "hunk text ends at unrecognized line");
                    return Some(Self::finish(hunk));
                }
                (TokenizerState::Idle, _) => {
                    debug!(line_no = self.line_no, "hunk text has no header here; stopping");
                    return None;
                }
                (TokenizerState::Done, _) => return None,
            }
        }
    }
}

/// Parse every hunk in `text`.
#[must_use]
pub fn parse_hunks(text: &str) -> Vec<Hunk> {
    HunkTokenizer::new(text).collect()
}
