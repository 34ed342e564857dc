//! # Slackpack
//!
//! A Rust library for turning a Slack workspace export into a readable,
//! greppable text transcript.
//!
//! ## Overview
//!
//! A Slack export holds one folder per channel and one JSON file per day in
//! each folder, plus a workspace-wide `users.json`. Slackpack renders every
//! day file of a channel into a single plain-text file:
//!
//! - Timestamps become local (or UTC) date-times with microseconds
//! - User identifiers are replaced with real names from `users.json`
//! - File uploads, shared messages, link unfurls and reactions get their own lines
//! - Thread replies are nested under their parent and not repeated at top level
//!
//! The same content is streamed to the console, optionally with ANSI colors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slackpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let options = ExportOptions::new("export/general", "general.txt");
//!     let summary = run_export(&options, &mut std::io::stdout().lock())?;
//!     println!("{} messages", summary.messages);
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a Single File
//!
//! ```rust
//! use slackpack::prelude::*;
//!
//! let records = DayFileParser::new()
//!     .parse_str(r#"[{"type": "message", "ts": "1.0", "user": "U1", "text": "U1 here"}]"#)
//!     .unwrap();
//!
//! let identities = IdentityMap::from_pairs([("U1", "Alice")]);
//! let config = RenderConfig::new().with_timezone(TimeZoneMode::Utc).with_color(false);
//! let transcript = TranscriptAssembler::new(&identities, &config)
//!     .assemble("day.json", RecordCollection::new(records), &mut std::io::sink())
//!     .unwrap();
//!
//! assert_eq!(
//!     transcript.lines[1],
//!     "[1970-01-01 00:00:01.000000]: message - NO SUBTYPE <Alice>: Alice here"
//! );
//! ```
//!
//! ## Module Structure
//!
//! - [`message`] — Domain model ([`MessageRecord`], [`SlackTs`](message::SlackTs), files, attachments, reactions, threads)
//! - [`parsing`] — Export schema parsing
//!   - [`DayFileParser`](parsing::DayFileParser) — Day files to message records
//!   - [`parse_person`](parsing::parse_person) — `users.json` entries
//! - [`core`] — Conversion
//!   - [`core::timestamp`] — [`TimestampFormatter`](core::TimestampFormatter)
//!   - [`core::identity`] — [`IdentityMap`](core::IdentityMap)
//!   - [`core::collection`] — [`RecordCollection`](core::RecordCollection)
//!   - [`core::render`] — Plain and styled renderings of one content model
//!   - [`core::formatter`] — [`MessageFormatter`](core::MessageFormatter)
//!   - [`core::assembler`] — [`TranscriptAssembler`](core::TranscriptAssembler)
//!   - [`core::output`] — [`write_text`](core::write_text)
//! - [`export`] — Whole-folder conversion ([`run_export`](export::run_export))
//! - [`config`] — [`RenderConfig`](config::RenderConfig)
//! - [`cli`] — CLI types (feature `cli`)
//! - [`error`] — Unified error types ([`SlackpackError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod message;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SlackpackError};
pub use message::MessageRecord;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use slackpack::prelude::*;
/// ```
pub mod prelude {
    // Domain model
    pub use crate::message::{Attachment, FileUpload, MessageRecord, Reaction, ReplyStub, SlackTs};

    // Error types
    pub use crate::error::{Result, SlackpackError};

    // Configuration
    pub use crate::config::{RenderConfig, TimeZoneMode};

    // Parsing
    pub use crate::parsing::DayFileParser;

    // Conversion
    pub use crate::core::{
        FileTranscript, IdentityMap, MessageFormatter, RecordCollection, TimestampFormatter,
        TranscriptAssembler,
    };

    // Output
    pub use crate::core::output::{to_text, write_text};

    // Whole-folder driver
    pub use crate::export::{ConversionSummary, ExportOptions, run_export};
}
