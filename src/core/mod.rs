//! Core conversion logic for slackpack.
//!
//! This module contains:
//! - [`timestamp`] - Epoch timestamps to display strings
//! - [`identity`] - User identifier to display name substitution
//! - [`collection`] - Per-file records and reply consumption
//! - [`render`] - The line/segment content model and its plain and styled renderings
//! - [`formatter`] - One message record to rendered text
//! - [`assembler`] - One day file to a transcript
//! - [`output`] - Text file writer
//!
//! # Quick Start
//!
//! ```rust
//! use slackpack::config::{RenderConfig, TimeZoneMode};
//! use slackpack::core::{IdentityMap, RecordCollection, TranscriptAssembler};
//! use slackpack::message::MessageRecord;
//!
//! let identities = IdentityMap::from_pairs([("U1", "Alice")]);
//! let config = RenderConfig::new().with_timezone(TimeZoneMode::Utc);
//! let collection = RecordCollection::new(vec![MessageRecord::new("1.0", "U1", "U1 here")]);
//!
//! let transcript = TranscriptAssembler::new(&identities, &config)
//!     .assemble("day.json", collection, &mut std::io::sink())
//!     .unwrap();
//! assert!(transcript.lines[1].ends_with("<Alice>: Alice here"));
//! ```

pub mod assembler;
pub mod collection;
pub mod formatter;
pub mod identity;
pub mod output;
pub mod render;
pub mod timestamp;

// Re-export main types for convenience
pub use assembler::{FileTranscript, TranscriptAssembler};
pub use collection::RecordCollection;
pub use formatter::{MessageFormatter, Rendered, effective_subtype};
pub use identity::IdentityMap;
pub use output::{to_text, write_text};
pub use render::{RenderedLine, RenderedMessage, Segment, SegmentKind, strip_ansi};
pub use timestamp::TimestampFormatter;
