//! Render configuration and per-request view options

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::layout::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_ELISION_THRESHOLD, DEFAULT_MAX_LINE_WIDTH,
    DEFAULT_TAB_REPLACEMENT,
};

/// Site-wide rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lines kept on each side of a comment or file boundary when eliding.
    pub context_window: usize,
    /// Unchanged segments longer than this are elided.
    pub elision_threshold: usize,
    /// Characters of source text kept per line; 0 keeps everything.
    pub max_line_width: usize,
    pub tab_replacement: String,
    /// syntect theme name for highlighted output.
    pub syntax_theme: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            elision_threshold: DEFAULT_ELISION_THRESHOLD,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            tab_replacement: DEFAULT_TAB_REPLACEMENT.to_string(),
            syntax_theme: None,
        }
    }
}

/// Options chosen by the reviewer for one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub unified_view: bool,
    pub base_on_left: bool,
    pub omit_unchanged_lines: bool,
    /// Selects which diff invocation produced the hunks; parsing ignores it.
    pub ignore_whitespace: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            unified_view: false,
            base_on_left: true,
            omit_unchanged_lines: true,
            ignore_whitespace: false,
        }
    }
}

/// Load render configuration from the user's config directory.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_render_config() -> anyhow::Result<Option<RenderConfig>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_render_config_from(&path).map(Some)
}

/// Load render configuration from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid config JSON.
pub fn load_render_config_from(path: &Path) -> anyhow::Result<RenderConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else if let Ok(home) = std::env::var("HOME") {
        Path::new(&home).join(".config")
    } else {
        return None;
    };

    Some(base.join("critview").join("render.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config(r#"{"context_window": 10, "syntax_theme": "base16-ocean.dark"}"#);
        let config = load_render_config_from(file.path()).expect("valid config");

        assert_eq!(config.context_window, 10);
        assert_eq!(config.elision_threshold, DEFAULT_ELISION_THRESHOLD);
        assert_eq!(config.tab_replacement, DEFAULT_TAB_REPLACEMENT);
        assert_eq!(config.syntax_theme.as_deref(), Some("base16-ocean.dark"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let file = write_config("{ not json");
        let err = load_render_config_from(file.path()).expect_err("should fail");
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err =
            load_render_config_from(&dir.path().join("absent.json")).expect_err("should fail");
        assert!(format!("{err:#}").contains("Failed to read config"));
    }

    #[test]
    fn test_view_options_defaults() {
        let options: ViewOptions =
            serde_json::from_str(r#"{"unified_view": true}"#).expect("valid");
        assert!(options.unified_view);
        assert!(options.base_on_left);
        assert!(options.omit_unchanged_lines);
        assert!(!options.ignore_whitespace);
    }
}
