//! Reading time formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reading time as supplied by the content source.
///
/// A bare number is a count of minutes; a string is already formatted
/// (`"5 min read"`) and is passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingTime {
    /// Minutes, rendered as `"<n> min read"`.
    Minutes(f64),
    /// Preformatted text.
    Text(String),
}

impl ReadingTime {
    /// Returns true for values that render as nothing: `0`, NaN, `""`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Minutes(n) => *n == 0.0 || n.is_nan(),
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl From<u32> for ReadingTime {
    fn from(minutes: u32) -> Self {
        Self::Minutes(f64::from(minutes))
    }
}

impl From<f64> for ReadingTime {
    fn from(minutes: f64) -> Self {
        Self::Minutes(minutes)
    }
}

impl From<&str> for ReadingTime {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ReadingTime {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            _ if self.is_empty() => Ok(()),
            Self::Minutes(n) => write!(f, "{} min read", Minutes(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Whole minutes print without a decimal point.
struct Minutes(f64);

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Format a reading time for display.
///
/// `None` and empty values give `""`; minutes give `"<n> min read"`;
/// text is returned unchanged.
pub fn format_reading_time(input: Option<&ReadingTime>) -> String {
    input.map(ReadingTime::to_string).unwrap_or_default()
}
