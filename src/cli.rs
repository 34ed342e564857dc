//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ColorChoice`] - When to style console output
//!
//! `Args` turns into the library types with [`Args::render_config`] and
//! [`Args::export_options`], so the binary holds no conversion logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{RenderConfig, TimeZoneMode};
use crate::export::ExportOptions;

/// Convert a folder of Slack export JSON files into one readable
/// text transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackpack export/general general.txt
    slackpack export/general general.txt --utc --color never
    slackpack export/random random.txt --users export/users.json -q")]
pub struct Args {
    /// Channel folder containing the day files (YYYY-MM-DD.json)
    pub folder: String,

    /// Path to the transcript file to create
    pub output: String,

    /// Identity file mapping user IDs to names (default: search for users.json)
    #[arg(long, value_name = "PATH")]
    pub users: Option<String>,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// When to color console output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Do not stream the transcript to the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Report per-file progress and debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the rendering settings for this invocation.
    pub fn render_config(&self) -> RenderConfig {
        let timezone = if self.utc {
            TimeZoneMode::Utc
        } else {
            TimeZoneMode::Local
        };
        RenderConfig::new()
            .with_timezone(timezone)
            .with_verbose(self.verbose)
            .with_color(self.color.resolve(
                std::io::stdout().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            ))
    }

    /// Builds the conversion options for this invocation.
    pub fn export_options(&self) -> ExportOptions {
        let options = ExportOptions::new(&self.folder, &self.output).with_config(self.render_config());
        match &self.users {
            Some(path) => options.with_users(path),
            None => options,
        }
    }
}

/// When to use ANSI styling on the console.
///
/// The transcript file is always plain text; this only affects stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Style when stdout is a terminal and `NO_COLOR` is unset (default)
    #[default]
    Auto,

    /// Always style
    Always,

    /// Never style
    Never,
}

impl ColorChoice {
    /// Decides whether to style, given the terminal state and `NO_COLOR`.
    pub fn resolve(self, is_terminal: bool, no_color: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal && !no_color,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl std::fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
        }
    }
}
