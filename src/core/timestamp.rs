//! Slack timestamp conversion.
//!
//! Slack stores times as epoch seconds with a microsecond fraction, either as
//! a string (`"1744455814.517349"`) or as a JSON number. Both go through
//! [`parse_epoch`] and come out in the fixed display format
//! `YYYY-MM-DD HH:MM:SS.ffffff`.
//!
//! Decoration such as brackets or color is not added here.

use chrono::{DateTime, Local, Utc};

use crate::config::{RenderConfig, TimeZoneMode};
use crate::error::{Result, SlackpackError};
use crate::message::SlackTs;

/// chrono format string for rendered timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parses epoch seconds into a UTC instant.
///
/// Plain decimal strings are split on the dot and read exactly, so
/// `"1744455814.517349"` keeps all six fractional digits (further digits are
/// truncated). Anything else Rust accepts as an `f64` (exponents, a sign) is
/// converted through floating point and rounded to the microsecond.
///
/// # Example
///
/// ```rust
/// use slackpack::core::timestamp::parse_epoch;
///
/// let dt = parse_epoch("1744455814.517349").unwrap();
/// assert_eq!(dt.timestamp(), 1744455814);
/// assert_eq!(dt.timestamp_subsec_micros(), 517349);
/// ```
pub fn parse_epoch(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| SlackpackError::invalid_timestamp(raw))?;
    if !value.is_finite() {
        return Err(SlackpackError::invalid_timestamp(raw));
    }

    let (secs, micros) = split_decimal(trimmed).unwrap_or_else(|| split_float(value));
    DateTime::from_timestamp(secs, micros * 1_000).ok_or_else(|| SlackpackError::invalid_timestamp(raw))
}

fn split_decimal(s: &str) -> Option<(i64, u32)> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let secs = whole.parse::<i64>().ok()?;
    let mut micros = 0u32;
    for i in 0..6 {
        let digit = fraction.as_bytes().get(i).map_or(0, |b| u32::from(b - b'0'));
        micros = micros * 10 + digit;
    }
    Some((secs, micros))
}

fn split_float(value: f64) -> (i64, u32) {
    let secs = value.floor();
    let micros = ((value - secs) * 1_000_000.0).round() as u32;
    if micros >= 1_000_000 {
        (secs as i64 + 1, 0)
    } else {
        (secs as i64, micros)
    }
}

/// Converts Slack timestamps into display strings.
///
/// # Example
///
/// ```rust
/// use slackpack::config::TimeZoneMode;
/// use slackpack::core::timestamp::TimestampFormatter;
///
/// let formatter = TimestampFormatter::new(TimeZoneMode::Utc);
/// assert_eq!(
///     formatter.format_str("1744455814.517349").unwrap(),
///     "2025-04-12 11:03:34.517349"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampFormatter {
    timezone: TimeZoneMode,
}

impl TimestampFormatter {
    pub fn new(timezone: TimeZoneMode) -> Self {
        Self { timezone }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.timezone)
    }

    /// Formats a timestamp taken from a record.
    pub fn format(&self, raw: &SlackTs) -> Result<String> {
        self.format_str(raw.as_str())
    }

    /// Formats a textual epoch value.
    pub fn format_str(&self, raw: &str) -> Result<String> {
        let instant = parse_epoch(raw)?;
        Ok(self.format_instant(instant))
    }

    /// Formats an already parsed instant in the configured time zone.
    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        match self.timezone {
            TimeZoneMode::Utc => instant.format(DISPLAY_FORMAT).to_string(),
            TimeZoneMode::Local => instant
                .with_timezone(&Local)
                .format(DISPLAY_FORMAT)
                .to_string(),
        }
    }
}
