//! Whole-folder conversion.
//!
//! This is the library entry point the binary drives. [`run_export`] discovers
//! the day files of one channel folder, loads the optional identity file,
//! renders every file in name order and writes the combined transcript.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> slackpack::Result<()> {
//! use slackpack::config::{RenderConfig, TimeZoneMode};
//! use slackpack::export::{ExportOptions, run_export};
//!
//! let options = ExportOptions::new("export/general", "general.txt")
//!     .with_config(RenderConfig::new().with_timezone(TimeZoneMode::Utc).with_color(false));
//!
//! let summary = run_export(&options, &mut std::io::stdout().lock())?;
//! println!("{} messages from {} files", summary.messages, summary.files);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::RenderConfig;
use crate::core::assembler::{FileTranscript, TranscriptAssembler};
use crate::core::identity::IdentityMap;
use crate::core::output::write_text;
use crate::error::{Result, SlackpackError};
use crate::parsing::slack::DayFileParser;
use crate::parsing::users::load_users_file;

/// File name of the identity file in a Slack export.
pub const USERS_FILE: &str = "users.json";

/// Lists the day files of a channel folder, sorted by file name.
///
/// Day files are the `*.json` files directly inside `folder`, except
/// [`USERS_FILE`]. Subdirectories are not searched.
pub fn discover_day_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(SlackpackError::input_not_found(folder, "no such directory"));
    }
    if !folder.is_dir() {
        return Err(SlackpackError::input_not_found(folder, "not a directory"));
    }

    let entries = fs::read_dir(folder)
        .map_err(|_| SlackpackError::input_not_found(folder, "directory cannot be read"))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|_| SlackpackError::input_not_found(folder, "directory cannot be read"))?
            .path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let is_users = path.file_name().is_some_and(|name| name == USERS_FILE);
        if path.is_file() && is_json && !is_users {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(SlackpackError::input_not_found(folder, "no JSON day files"));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    log::debug!("found {} day files in {}", files.len(), folder.display());
    Ok(files)
}

/// Finds the identity file for a channel folder.
///
/// Looks in the folder itself, then in its parent (the export root), then in
/// the working directory.
pub fn find_users_file(folder: &Path) -> Option<PathBuf> {
    [
        folder.join(USERS_FILE),
        folder.join("..").join(USERS_FILE),
        PathBuf::from(USERS_FILE),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

/// Builds the identity map from an identity file.
///
/// Never fails: a missing or unreadable file yields an empty map, so
/// identifiers are left as they are.
pub fn load_identities(path: Option<&Path>) -> IdentityMap {
    let Some(path) = path else {
        log::info!("no {USERS_FILE} found, user identifiers will not be resolved");
        return IdentityMap::empty();
    };

    match load_users_file(path) {
        Ok(entries) => {
            let map = IdentityMap::build(&entries);
            log::info!("loaded {} identities from {}", map.len(), path.display());
            map
        }
        Err(err) => {
            log::warn!("ignoring identity file: {err}");
            IdentityMap::empty()
        }
    }
}

/// What to convert and where to write it.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Channel folder holding the day files
    pub folder: PathBuf,

    /// Transcript file to create
    pub output: PathBuf,

    /// Explicit identity file; `None` searches with [`find_users_file`]
    pub users: Option<PathBuf>,

    /// Rendering settings
    pub config: RenderConfig,
}

impl ExportOptions {
    pub fn new(folder: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            output: output.into(),
            users: None,
            config: RenderConfig::default(),
        }
    }

    /// Uses `path` as the identity file instead of searching for one.
    #[must_use]
    pub fn with_users(mut self, path: impl Into<PathBuf>) -> Self {
        self.users = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// The identity file this run will read, if any.
    pub fn resolve_users_file(&self) -> Option<PathBuf> {
        match &self.users {
            Some(path) if path.is_file() => Some(path.clone()),
            Some(path) => {
                log::warn!("identity file {} not found", path.display());
                None
            }
            None => find_users_file(&self.folder),
        }
    }
}

/// Counts for a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Day files converted
    pub files: usize,
    /// Top-level messages rendered
    pub messages: usize,
    /// Records shown only inside a reply thread
    pub replies_folded: usize,
    /// Reply stubs rendered with empty text
    pub unresolved_replies: usize,
}

impl ConversionSummary {
    fn add(&mut self, transcript: &FileTranscript) {
        self.files += 1;
        self.messages += transcript.messages;
        self.replies_folded += transcript.replies_folded;
        self.unresolved_replies += transcript.unresolved_replies;
    }
}

/// Converts a channel folder into one text transcript.
///
/// Each day file is rendered in name order and streamed to `console` as it
/// goes. The output file is written once every file has rendered, so a fatal
/// error in any day file leaves no partial output behind.
pub fn run_export<W: Write>(options: &ExportOptions, console: &mut W) -> Result<ConversionSummary> {
    let files = discover_day_files(&options.folder)?;
    let identities = load_identities(options.resolve_users_file().as_deref());
    let assembler = TranscriptAssembler::new(&identities, &options.config);
    let parser = DayFileParser::new();

    let mut summary = ConversionSummary::default();
    let mut transcripts = Vec::with_capacity(files.len());

    for path in &files {
        let collection = parser.load_collection(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let transcript = assembler
            .assemble(&name, collection, console)
            .map_err(|e| e.in_file(path))?;
        summary.add(&transcript);
        transcripts.push(transcript);
    }
    console.flush()?;

    write_text(&transcripts, &options.output)?;
    Ok(summary)
}
