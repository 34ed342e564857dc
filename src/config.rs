//! Configuration types for rendering and conversion.
//!
//! This module provides a plain configuration struct for library usage,
//! without any CLI framework dependencies. The driver builds one
//! [`RenderConfig`] and hands it to every component at construction.
//!
//! # Example
//!
//! ```rust
//! use slackpack::config::{RenderConfig, TimeZoneMode};
//!
//! let config = RenderConfig::new()
//!     .with_timezone(TimeZoneMode::Utc)
//!     .with_verbose(true);
//!
//! assert!(config.verbose);
//! ```

use serde::{Deserialize, Serialize};

/// Which clock display timestamps are converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The host's local time zone (default)
    #[default]
    Local,

    /// Coordinated Universal Time
    Utc,
}

impl std::fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeZoneMode::Local => write!(f, "local"),
            TimeZoneMode::Utc => write!(f, "UTC"),
        }
    }
}

/// Settings shared by the formatter, the assembler and the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Time zone used for every rendered timestamp (default: local)
    pub timezone: TimeZoneMode,

    /// Report per-file progress at info level instead of debug (default: false)
    pub verbose: bool,

    /// Stream the ANSI-styled rendering to the console (default: true)
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            timezone: TimeZoneMode::Local,
            verbose: false,
            color: true,
        }
    }
}

impl RenderConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time zone for rendered timestamps.
    #[must_use]
    pub fn with_timezone(mut self, timezone: TimeZoneMode) -> Self {
        self.timezone = timezone;
        self
    }

    /// Enables or disables verbose progress reporting.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables or disables styled console output.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Log level used for per-file progress messages.
    pub fn progress_level(&self) -> log::Level {
        if self.verbose {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}
