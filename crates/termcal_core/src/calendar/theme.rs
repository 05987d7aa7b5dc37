//! Named style tokens for pluggable output backends.
//!
//! The renderer only knows roles (`today`, `heading`, `today_line`); each
//! backend decides how a role is decorated.

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ANSI_RED: &str = "\x1b[91m";
const ANSI_GREEN: &str = "\x1b[92m";
const ANSI_YELLOW: &str = "\x1b[93m";
const ANSI_RESET: &str = "\x1b[0m";

/// Opening/closing decoration wrapped around a span of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleToken {
    pub open: Cow<'static, str>,
    pub close: Cow<'static, str>,
}

impl StyleToken {
    pub const fn plain() -> Self {
        Self {
            open: Cow::Borrowed(""),
            close: Cow::Borrowed(""),
        }
    }

    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self {
            open: Cow::Borrowed(open),
            close: Cow::Borrowed(close),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        format!("{}{}{}", self.open, text, self.close)
    }
}

/// Style tokens handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Today's cell in the grid.
    pub today: StyleToken,
    /// Section headings (`Notes:`, `All notes:`).
    pub heading: StyleToken,
    /// Date part of the trailing `Today:` line.
    pub today_line: StyleToken,
    /// Escape `<`, `>`, `&` and quotes in user text.
    pub escape_html: bool,
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            today: StyleToken::plain(),
            heading: StyleToken::plain(),
            today_line: StyleToken::plain(),
            escape_html: false,
        }
    }

    pub fn ansi() -> Self {
        Self {
            today: StyleToken::new(ANSI_RED, ANSI_RESET),
            heading: StyleToken::new(ANSI_YELLOW, ANSI_RESET),
            today_line: StyleToken::new(ANSI_GREEN, ANSI_RESET),
            escape_html: false,
        }
    }

    pub fn html() -> Self {
        Self {
            today: StyleToken::new("<span class=\"today\">", "</span>"),
            heading: StyleToken::new("<span class=\"heading\">", "</span>"),
            today_line: StyleToken::new("<span class=\"today-line\">", "</span>"),
            escape_html: true,
        }
    }

    /// Prepares user-provided text for this backend.
    pub fn text<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.escape_html {
            Cow::Owned(escape_html(value))
        } else {
            Cow::Borrowed(value)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}

/// Output backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Plain,
    Ansi,
    Html,
}

impl OutputStyle {
    pub fn theme(&self) -> Theme {
        match self {
            Self::Plain => Theme::plain(),
            Self::Ansi => Theme::ansi(),
            Self::Html => Theme::html(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl Display for UnknownStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported output style `{}`; expected plain|ansi|html",
            self.0
        )
    }
}

impl Error for UnknownStyle {}

impl FromStr for OutputStyle {
    type Err = UnknownStyle;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "none" => Ok(Self::Plain),
            "ansi" | "color" => Ok(Self::Ansi),
            "html" => Ok(Self::Html),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
