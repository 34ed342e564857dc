//! Unified error types for slackpack.
//!
//! This module provides a single [`SlackpackError`] enum that covers all error
//! cases in the library. Fatal kinds abort a conversion run; the identity and
//! reply-reference kinds are recoverable and are only ever logged.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **The binary** gets a distinct exit status per fatal kind via [`SlackpackError::exit_code`]

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for slackpack operations.
///
/// # Example
///
/// ```rust
/// use slackpack::error::Result;
///
/// fn my_function() -> Result<Vec<String>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SlackpackError>;

/// The error type for all slackpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackpackError {
    /// The input folder is missing, is not a directory, or holds no day files.
    #[error("Input not found: {path} ({reason})")]
    InputNotFound {
        /// The folder that was requested
        path: PathBuf,
        /// What exactly was wrong with it
        reason: &'static str,
    },

    /// An I/O error occurred while reading input.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A day file could not be read, or is not valid UTF-8.
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        /// The file being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A day file or the identity file is not valid JSON of the expected shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// The file being parsed
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// JSON that was not read from a file failed to parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record lacks a field required to render it.
    ///
    /// Every record needs `type`; records of type `"message"` additionally
    /// need `ts`, `user` and `text`.
    #[error("Malformed record #{index}{}: missing required field '{field}'", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    MalformedRecord {
        /// The day file, if known
        path: Option<PathBuf>,
        /// Zero-based position of the record in its file
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A timestamp could not be read as a real number.
    #[error("Invalid timestamp '{value}'{}: expected epoch seconds such as 1744455814.517349", location(*record, path.as_deref()))]
    InvalidTimestamp {
        /// The raw value that failed to parse
        value: String,
        /// The day file, if known
        path: Option<PathBuf>,
        /// Zero-based position among the file's message records, if known
        record: Option<usize>,
    },

    /// A person entry in `users.json` could not be used.
    ///
    /// Recoverable: the entry is skipped.
    #[error("Skipping identity entry #{index}: {reason}")]
    MalformedIdentityRecord {
        /// Zero-based position of the entry in the identity file
        index: usize,
        /// Why the entry was rejected
        reason: String,
    },

    /// A reply stub points at a timestamp with no available record.
    ///
    /// Recoverable: the reply is rendered with empty text.
    #[error("Reply {ts} has no matching message in this file")]
    UnresolvedReplyReference {
        /// The stub's timestamp
        ts: String,
    },

    /// The output file could not be created or written.
    #[error("Cannot write output file {}: {source}", path.display())]
    OutputWrite {
        /// The output path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Renders " in record #N of FILE" from whatever context is known.
fn location(record: Option<usize>, path: Option<&Path>) -> String {
    match (record, path) {
        (Some(index), Some(path)) => format!(" in record #{index} of {}", path.display()),
        (Some(index), None) => format!(" in record #{index}"),
        (None, Some(path)) => format!(" in {}", path.display()),
        (None, None) => String::new(),
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SlackpackError {
    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        SlackpackError::InputNotFound {
            path: path.into(),
            reason,
        }
    }

    /// Creates a parse error for the given file.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SlackpackError::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a read error for the given file.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SlackpackError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed record error without file context.
    pub fn malformed_record(index: usize, field: &'static str) -> Self {
        SlackpackError::MalformedRecord {
            path: None,
            index,
            field,
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        SlackpackError::InvalidTimestamp {
            value: value.into(),
            path: None,
            record: None,
        }
    }

    /// Creates a malformed identity record error.
    pub fn malformed_identity(index: usize, reason: impl Into<String>) -> Self {
        SlackpackError::MalformedIdentityRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an unresolved reply reference error.
    pub fn unresolved_reply(ts: impl Into<String>) -> Self {
        SlackpackError::UnresolvedReplyReference { ts: ts.into() }
    }

    /// Creates an output write error.
    pub fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SlackpackError::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Attaches the day file path to a [`MalformedRecord`](Self::MalformedRecord)
    /// or [`InvalidTimestamp`](Self::InvalidTimestamp) error.
    ///
    /// Other variants, and errors that already name a file, are returned unchanged.
    #[must_use]
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            SlackpackError::MalformedRecord {
                path: None,
                index,
                field,
            } => SlackpackError::MalformedRecord {
                path: Some(file.into()),
                index,
                field,
            },
            SlackpackError::InvalidTimestamp {
                value,
                path: None,
                record,
            } => SlackpackError::InvalidTimestamp {
                value,
                path: Some(file.into()),
                record,
            },
            other => other,
        }
    }

    /// Attaches the position of the record being rendered to an
    /// [`InvalidTimestamp`](Self::InvalidTimestamp) error.
    #[must_use]
    pub fn at_record(self, index: usize) -> Self {
        match self {
            SlackpackError::InvalidTimestamp {
                value,
                path,
                record: None,
            } => SlackpackError::InvalidTimestamp {
                value,
                path,
                record: Some(index),
            },
            other => other,
        }
    }

    /// Returns `true` if this error is one the run recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SlackpackError::MalformedIdentityRecord { .. }
                | SlackpackError::UnresolvedReplyReference { .. }
        )
    }

    /// Returns `true` if this is a malformed record error.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, SlackpackError::MalformedRecord { .. })
    }

    /// Returns `true` if this is an invalid timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, SlackpackError::InvalidTimestamp { .. })
    }

    /// Returns `true` if this is an input-not-found error.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, SlackpackError::InputNotFound { .. })
    }

    /// Process exit status for this error.
    ///
    /// | Kind | Status |
    /// |------|--------|
    /// | `InputNotFound` | 2 |
    /// | `Parse`, `Json`, `MalformedRecord` | 3 |
    /// | `InvalidTimestamp` | 4 |
    /// | `OutputWrite` | 5 |
    /// | anything else, including `Read` | 1 |
    pub fn exit_code(&self) -> i32 {
        match self {
            SlackpackError::InputNotFound { .. } => 2,
            SlackpackError::Parse { .. }
            | SlackpackError::Json(_)
            | SlackpackError::MalformedRecord { .. } => 3,
            SlackpackError::InvalidTimestamp { .. } => 4,
            SlackpackError::OutputWrite { .. } => 5,
            _ => 1,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
