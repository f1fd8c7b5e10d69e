use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Rendering applied to the instant shown next to a log prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimestampFormat {
    /// `HH:MM:SS` in local time
    #[default]
    Time,
    /// `YYYY-MM-DD HH:MM:SS` in local time
    DateTime,
    /// RFC 3339 with millisecond precision, UTC
    Iso,
    /// Milliseconds since the Unix epoch
    Ms,
}

impl TimestampFormat {
    /// Resolve a format from its configuration name.
    ///
    /// Unrecognized names fall back to `Time` rather than failing.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "datetime" => Self::DateTime,
            "iso" => Self::Iso,
            "ms" => Self::Ms,
            _ => Self::Time,
        }
    }

    /// Name used in configuration
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Iso => "iso",
            Self::Ms => "ms",
        }
    }
}

impl Serialize for TimestampFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// Deserialization shares the from_name fallback: a config file naming a
// format this version does not know still produces a working logger.
impl<'de> Deserialize<'de> for TimestampFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Render the current instant in the given format
#[must_use]
pub fn format_timestamp(format: TimestampFormat) -> String {
    format_instant(format, Utc::now())
}

/// Render a specific instant in the given format
#[must_use]
pub fn format_instant(format: TimestampFormat, instant: DateTime<Utc>) -> String {
    match format {
        TimestampFormat::Time => instant.with_timezone(&Local).format("%H:%M:%S").to_string(),
        TimestampFormat::DateTime => instant
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        TimestampFormat::Iso => instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        TimestampFormat::Ms => instant.timestamp_millis().to_string(),
    }
}
