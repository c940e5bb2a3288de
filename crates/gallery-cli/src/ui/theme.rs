//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        match self {
            Self::Ok => {
                if unicode {
                    "[\u{2713}]" // [✓]
                } else {
                    "[OK]"
                }
            }
            Self::Warn => {
                if unicode {
                    "[\u{26A0}]" // [⚠]
                } else {
                    "[WARN]"
                }
            }
            Self::Err => {
                if unicode {
                    "[\u{2717}]" // [✗]
                } else {
                    "[ERR]"
                }
            }
            Self::Info => {
                if unicode {
                    "[\u{2139}]" // [ℹ]
                } else {
                    "[INFO]"
                }
            }
        }
    }

    /// Get the style for this badge.
    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::ok(),
            Self::Warn => styles::warn(),
            Self::Err => styles::err(),
            Self::Info => styles::info(),
        }
    }
}

/// Style constructors for common roles.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn ok() -> Style {
        Style::new().green()
    }

    pub fn warn() -> Style {
        Style::new().yellow()
    }

    pub fn err() -> Style {
        Style::new().red()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }
}

/// Apply a style to text when color is enabled.
pub fn styled(text: &str, style: Style, enabled: bool) -> String {
    if enabled {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Theme configuration for UI rendering.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Spinner frames for unicode mode
    pub spinner_unicode: &'static [&'static str],
    /// Spinner frames for ASCII mode
    pub spinner_ascii: &'static [&'static str],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Braille spinner (smooth rotation)
            spinner_unicode: &[
                "\u{280B}", // ⠋
                "\u{2819}", // ⠙
                "\u{2839}", // ⠹
                "\u{2838}", // ⠸
                "\u{283C}", // ⠼
                "\u{2834}", // ⠴
                "\u{2826}", // ⠦
                "\u{2827}", // ⠧
                "\u{2807}", // ⠇
                "\u{280F}", // ⠏
            ],
            // Classic ASCII spinner
            spinner_ascii: &["|", "/", "-", "\\"],
        }
    }
}

impl Theme {
    /// Get spinner frames based on unicode setting.
    pub fn spinner_frames(&self, unicode: bool) -> &'static [&'static str] {
        if unicode {
            self.spinner_unicode
        } else {
            self.spinner_ascii
        }
    }
}
