//! Colour and glyph choices for rendered output
//!
//! Every paint call goes through a [`Palette`] built from an explicit
//! [`RenderConfig`]. With colour off the palette returns the text untouched,
//! so no ANSI escape can leak into piped output or tests.

use colored::{ColoredString, Colorize};
use std::borrow::Cow;

/// Brand accent colour (lime)
const LIME: (u8, u8, u8) = (191, 245, 73);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Emit ANSI colour codes
    pub color: bool,
    /// Use box-drawing and check-mark glyphs; ASCII stand-ins otherwise
    pub unicode: bool,
    /// Banner width in columns
    pub width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            unicode: true,
            width: 70,
        }
    }
}

impl RenderConfig {
    /// No colour, unicode glyphs
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    /// No colour and pure ASCII output
    pub fn ascii() -> Self {
        Self {
            color: false,
            unicode: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
    unicode: bool,
}

impl Palette {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            color: config.color,
            unicode: config.unicode,
        }
    }

    pub fn unicode(&self) -> bool {
        self.unicode
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn lime(&self, text: &str) -> String {
        self.paint(text, |t| t.truecolor(LIME.0, LIME.1, LIME.2))
    }

    pub fn lime_bold(&self, text: &str) -> String {
        self.paint(text, |t| t.truecolor(LIME.0, LIME.1, LIME.2).bold())
    }

    pub fn white(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_white())
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_red())
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_yellow())
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_cyan())
    }

    fn glyph(&self, unicode: &'static str, ascii: &'static str) -> &'static str {
        if self.unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn bullet(&self) -> &'static str {
        self.glyph("•", "*")
    }

    pub fn arrow(&self) -> &'static str {
        self.glyph("→", "->")
    }

    pub fn horizontal(&self) -> &'static str {
        self.glyph("─", "-")
    }

    pub fn success_indicator(&self, text: &str) -> String {
        format!("{} {}", self.lime(self.glyph("[✓]", "[+]")), self.lime(text))
    }

    pub fn error_indicator(&self, text: &str) -> String {
        format!("{} {}", self.white(self.glyph("[✗]", "[x]")), self.white(text))
    }

    pub fn warning_indicator(&self, text: &str) -> String {
        format!("{} {}", self.yellow("[!]"), self.white(text))
    }

    pub fn info_indicator(&self, text: &str) -> String {
        format!("{} {}", self.lime(self.glyph("[●]", "[*]")), self.white(text))
    }

    /// Text from tools or the title, transliterated when in ASCII mode
    pub fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.unicode || text.is_ascii() {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '—' | '–' | '─' => out.push('-'),
                '•' | '●' => out.push('*'),
                '→' => out.push_str("->"),
                '≥' => out.push_str(">="),
                '≤' => out.push_str("<="),
                '✓' => out.push('+'),
                '✗' => out.push('x'),
                '§' => out.push_str("S"),
                c if c.is_ascii() => out.push(c),
                _ => out.push('?'),
            }
        }
        Cow::Owned(out)
    }
}
