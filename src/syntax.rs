//! Syntax highlighting encoder using syntect
//!
//! Produces inline-styled HTML spans for one line at a time. The syntax is
//! picked from the file path the encoder was created for.

use std::path::Path;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::encode::{LineEncoder, PlainEncoder};
use crate::text::prepare_line;

/// Theme used when none is configured or the configured one is unknown.
pub const DEFAULT_SYNTAX_THEME: &str = "InspiredGitHub";

/// Syntax-highlighting [`LineEncoder`] for one file.
///
/// Each line is highlighted on its own with fresh parser state. Constructs
/// spanning lines (block comments, raw strings, heredocs) are only coloured
/// correctly on their first line.
pub struct SyntaxEncoder {
    syntax_set: SyntaxSet,
    theme: Theme,
    file_path: String,
    fallback: PlainEncoder,
}

impl SyntaxEncoder {
    /// Create an encoder for `file_path` with the default theme.
    #[must_use]
    pub fn new(file_path: impl Into<String>) -> Self {
        Self::with_theme(file_path, DEFAULT_SYNTAX_THEME)
    }

    /// Create an encoder with a specific syntect theme name.
    #[must_use]
    pub fn with_theme(file_path: impl Into<String>, theme_name: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(theme_name)
            .or_else(|| theme_set.themes.remove(DEFAULT_SYNTAX_THEME))
            .unwrap_or_default();

        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme,
            file_path: file_path.into(),
            fallback: PlainEncoder::html(),
        }
    }

    /// Whether a syntax was found for the file path.
    #[must_use]
    pub fn has_syntax(&self) -> bool {
        self.syntax_for_path().is_some()
    }

    /// Get syntax reference for the file path (by extension, then name)
    fn syntax_for_path(&self) -> Option<&SyntaxReference> {
        let path = Path::new(&self.file_path);

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if let Some(syntax) = self.syntax_set.find_syntax_by_extension(ext) {
                return Some(syntax);
            }
        }

        let name = path.file_name().and_then(|n| n.to_str())?;
        match name {
            "Makefile" | "makefile" | "GNUmakefile" => {
                self.syntax_set.find_syntax_by_extension("make")
            }
            "Dockerfile" => self.syntax_set.find_syntax_by_extension("dockerfile"),
            "Cargo.lock" => self.syntax_set.find_syntax_by_extension("toml"),
            _ => None,
        }
    }
}

impl LineEncoder for SyntaxEncoder {
    fn encode(&self, line: &str, max_width: usize, tab_replacement: &str) -> String {
        let Some(syntax) = self.syntax_for_path() else {
            return self.fallback.encode(line, max_width, tab_replacement);
        };

        let prepared = prepare_line(line, max_width, tab_replacement);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        highlighter
            .highlight_line(&prepared, &self.syntax_set)
            .ok()
            .and_then(|ranges| styled_line_to_highlighted_html(&ranges, IncludeBackground::No).ok())
            .unwrap_or_else(|| self.fallback.encode(&prepared, 0, tab_replacement))
    }
}
