//! Setting values and their token formatting.

use std::fmt;
use std::time::Duration;

/// The per-call value of a setting.
///
/// Formatting is a pure function of the variant and its payload, so the same
/// value always produces the same token.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// No value; only the flag is emitted.
    Flag,
    /// Verbatim text. Empty text behaves like [`SettingValue::Flag`].
    Text(String),
    /// Whole number, e.g. a sample rate.
    Integer(i64),
    /// Real number, e.g. a frame rate; printed without trailing zeros.
    Decimal(f64),
    /// Bit rate in kilobits per second, printed as `128k`.
    Kilobits(u32),
    /// Time offset or length, printed as `HH:MM:SS.mmm`.
    Time(Duration),
}

impl SettingValue {
    /// A text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether formatting produces no value token.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flag => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// The value token, or `None` when the value is empty.
    pub fn format(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Kilobits(n) => write!(f, "{n}k"),
            Self::Time(d) => {
                let total_ms = d.as_millis();
                let hours = total_ms / 3_600_000;
                let minutes = (total_ms / 60_000) % 60;
                let seconds = (total_ms / 1000) % 60;
                let millis = total_ms % 1000;
                write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
            }
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<Duration> for SettingValue {
    fn from(value: Duration) -> Self {
        Self::Time(value)
    }
}
