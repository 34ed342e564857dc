//! Output writers.
//!
//! - [`write_text`] / [`to_text`] - the plain-text transcript, one segment per day file
//!
//! The styled rendering is never written to disk; it only goes to the console
//! through [`TranscriptAssembler`](crate::core::assembler::TranscriptAssembler).
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> slackpack::Result<()> {
//! use slackpack::core::assembler::FileTranscript;
//! use slackpack::core::output::write_text;
//! use std::path::Path;
//!
//! let transcripts = vec![FileTranscript {
//!     lines: vec!["2024-01-15.json".into(), "[2024-01-15 10:30:00.000000]: message - NO SUBTYPE <U1>: hi".into()],
//!     ..FileTranscript::default()
//! }];
//!
//! write_text(&transcripts, Path::new("general.txt"))?;
//! # Ok(())
//! # }
//! ```

mod text_writer;

pub use text_writer::{to_text, write_text};
