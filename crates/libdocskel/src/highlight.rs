//! Terminal colors for rendered Java stubs.

use once_cell::sync::Lazy;
use syntect::{
    easy::HighlightLines,
    highlighting::{Style, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};

use crate::{DocskelError, Result};

/// Theme used unless another is chosen.
pub const DEFAULT_THEME: &str = "Solarized (dark)";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Colors Java source with 24-bit terminal escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    /// Name of a bundled theme.
    theme: String,
    /// Paint the theme's background behind the text too.
    background: bool,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            background: false,
        }
    }
}

impl Highlighter {
    /// A highlighter using [`DEFAULT_THEME`] over the terminal's own background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the bundled theme named `theme`.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Paint the theme background as well as the foreground.
    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// The configured theme name.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Names of the bundled themes, sorted.
    pub fn themes() -> Vec<&'static str> {
        THEME_SET.themes.keys().map(String::as_str).collect()
    }

    /// Highlight `code`, failing when the configured theme does not exist.
    pub fn highlight(&self, code: &str) -> Result<String> {
        let theme = THEME_SET
            .themes
            .get(&self.theme)
            .ok_or_else(|| DocskelError::UnknownTheme(self.theme.clone()))?;
        let mut h = HighlightLines::new(java_syntax(), theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            let ranges: Vec<(Style, &str)> = h.highlight_line(line, &SYNTAX_SET)?;
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], self.background));
        }
        if self.background {
            output.push_str("\x1b[0m");
        }
        Ok(output)
    }
}

/// The Java grammar, or plain text when the bundled set lacks one.
fn java_syntax() -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_extension("java")
        .or_else(|| SYNTAX_SET.find_syntax_by_name("Java"))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}
