//! Lazy reconstruction of post-change text
//!
//! [`PatchedTextReader`] merges a base line source with its hunks one line at
//! a time: base lines are copied until a hunk's effect line comes up, the
//! hunk's removed lines are skipped on the base side and its added lines are
//! spliced in. The reader is itself a [`LineSource`], so readers stack when a
//! revision is stored as a chain of deltas.

use std::iter::Peekable;

use tracing::{debug, warn};

use super::cursor::{LineCursor, LineSource, TextLines};
use super::parse::{Hunk, HunkTokenizer};

#[derive(Debug)]
enum ReaderState {
    /// Passing base lines through
    Copying,
    /// Emitting the added lines of the hunk just entered
    Splicing(std::vec::IntoIter<String>),
}

/// Yields the patched text of a base source plus a hunk stream.
///
/// Hunks are assumed to arrive in base order. Out-of-order hunks are applied
/// at the current position rather than rejected, and removed lines that do
/// not match the base are counted and logged but never fatal: this path
/// renders text, it does not validate patches.
pub struct PatchedTextReader<S, H: Iterator<Item = Hunk>> {
    base: LineCursor<S>,
    hunks: Peekable<H>,
    state: ReaderState,
    mismatches: usize,
}

impl<'a, S: LineSource> PatchedTextReader<S, HunkTokenizer<'a>> {
    /// Reader over `base` patched by raw normal-format `hunk_text`.
    pub fn new(base: LineCursor<S>, hunk_text: &'a str) -> Self {
        Self::from_hunks(base, HunkTokenizer::new(hunk_text))
    }
}

impl<S: LineSource, H: Iterator<Item = Hunk>> PatchedTextReader<S, H> {
    pub fn from_hunks<I>(base: LineCursor<S>, hunks: I) -> Self
    where
        I: IntoIterator<Item = Hunk, IntoIter = H>,
    {
        Self {
            base,
            hunks: hunks.into_iter().peekable(),
            state: ReaderState::Copying,
            mismatches: 0,
        }
    }

    /// Removed lines so far that did not match the base text.
    pub const fn mismatches(&self) -> usize {
        self.mismatches
    }

    /// Base lines consumed so far, copied or removed.
    pub const fn base_lines_consumed(&self) -> usize {
        self.base.line_number()
    }

    fn hunk_is_due(&mut self) -> bool {
        let next_base = self.base.next_line_number();
        let exhausted = self.base.is_exhausted();
        self.hunks
            .peek()
            .is_some_and(|hunk| exhausted || hunk.effect_line() <= next_base)
    }

    fn enter_hunk(&mut self, hunk: Hunk) {
        let next_base = self.base.next_line_number();
        if hunk.effect_line() < next_base {
            warn!(
                effect_line = hunk.effect_line(),
                next_base, "hunk out of order; applying at current position"
            );
        } else if self.base.is_exhausted() && hunk.effect_line() > next_base {
            debug!(
                effect_line = hunk.effect_line(),
                next_base, "hunk starts past end of base text"
            );
        }

        for expected in &hunk.removed_lines {
            let matched = self.base.advance().map(|actual| actual == expected.as_str());
            match matched {
                Some(true) => {}
                Some(false) => {
                    self.mismatches += 1;
                    warn!(
                        line = self.base.line_number(),
                        expected = expected.as_str(),
                        actual = self.base.current().unwrap_or_default(),
                        "removed line does not match base text"
                    );
                }
                None => {
                    self.mismatches += 1;
                    warn!(
                        effect_line = hunk.effect_line(),
                        "hunk removes lines past the end of base text"
                    );
                    break;
                }
            }
        }

        self.state = ReaderState::Splicing(hunk.added_lines.into_iter());
    }
}

impl<S: LineSource, H: Iterator<Item = Hunk>> LineSource for PatchedTextReader<S, H> {
    fn read_line(&mut self) -> Option<String> {
        loop {
            if let ReaderState::Splicing(added) = &mut self.state {
                if let Some(line) = added.next() {
                    return Some(line);
                }
                // Pure deletes land here without emitting anything.
                self.state = ReaderState::Copying;
            }

            if self.hunk_is_due() {
                if let Some(hunk) = self.hunks.next() {
                    self.enter_hunk(hunk);
                }
                continue;
            }

            if let Some(line) = self.base.advance() {
                return Some(line.to_owned());
            }
            if self.hunks.peek().is_none() {
                return None;
            }
        }
    }
}

/// Apply raw hunk text to `base` and collect the patched lines.
#[must_use]
pub fn apply_hunks(base: &str, hunk_text: &str) -> Vec<String> {
    let mut reader = PatchedTextReader::new(LineCursor::new(TextLines::new(base)), hunk_text);
    std::iter::from_fn(|| reader.read_line()).collect()
}
