//! Validated message model for Slack channel exports.
//!
//! This module provides [`MessageRecord`], the normalized representation of one
//! `"message"` entry from a Slack day file, plus the optional sub-structures a
//! record may carry: file uploads, attachments, reactions and a reply thread.
//!
//! Raw export objects are deserialized in [`crate::parsing::slack`] and
//! validated into these types; everything here is guaranteed to have its
//! required fields.
//!
//! # Examples
//!
//! ```
//! use slackpack::message::{MessageRecord, ReplyStub, SlackTs};
//!
//! let parent = MessageRecord::new("1.0", "U1", "hello")
//!     .with_replies("1.0", 1, vec![ReplyStub::new("2.0", "U2")]);
//!
//! assert!(parent.is_thread_parent());
//! assert_eq!(parent.ts, SlackTs::from("1.0"));
//! ```

use serde::Deserialize;

/// A Slack timestamp as found in an export.
///
/// Slack writes `ts` either as a string (`"1744455814.517349"`) or, in some
/// exports, as a bare JSON number. Both are kept in their textual form so the
/// value can serve as an identity key: a reply stub written as a number still
/// matches a record written as a string with the same digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawTs")]
pub struct SlackTs(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTs {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawTs> for SlackTs {
    fn from(raw: RawTs) -> Self {
        match raw {
            RawTs::Text(s) => SlackTs(s),
            RawTs::Number(n) => SlackTs(n.to_string()),
        }
    }
}

impl SlackTs {
    /// Wraps a textual timestamp.
    pub fn new(value: impl Into<String>) -> Self {
        SlackTs(value.into())
    }

    /// Returns the timestamp text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlackTs {
    fn from(value: &str) -> Self {
        SlackTs::new(value)
    }
}

impl From<String> for SlackTs {
    fn from(value: String) -> Self {
        SlackTs(value)
    }
}

impl From<f64> for SlackTs {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(|n| SlackTs(n.to_string()))
            .unwrap_or_else(|| SlackTs(value.to_string()))
    }
}

impl std::fmt::Display for SlackTs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file uploaded with a message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileUpload {
    /// `"tombstone"` when the file was deleted from the workspace
    pub mode: Option<String>,
    /// Upload time (epoch seconds)
    pub timestamp: Option<SlackTs>,
    /// File name
    pub name: Option<String>,
    /// Human-readable file type, e.g. `"PNG"`
    pub pretty_type: Option<String>,
}

impl FileUpload {
    /// Returns `true` if the file was deleted and only a placeholder remains.
    pub fn is_tombstone(&self) -> bool {
        self.mode.as_deref() == Some("tombstone")
    }
}

/// An unfurled link or a shared message attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Original post time, present for shared messages
    pub ts: Option<SlackTs>,
    /// Author of the shared message
    pub author_name: Option<String>,
    /// Body text
    pub text: Option<String>,
    /// Source URL, present for link unfurls
    pub from_url: Option<String>,
    /// Plain-text fallback summary
    pub fallback: Option<String>,
}

/// An emoji reaction and the users who left it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reaction {
    /// Emoji short name without colons
    pub name: String,
    /// Number of users who reacted, when the export states it
    pub count: Option<u64>,
    /// User identifiers of the reacting users
    pub users: Vec<String>,
}

impl Reaction {
    /// The stated count, or the number of listed users when absent.
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(self.users.len() as u64)
    }
}

/// A pointer from a thread parent to one of its replies.
///
/// Not a copy of the reply: the text lives in the full record with the same
/// `ts` elsewhere in the same day file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplyStub {
    /// Timestamp of the reply record
    pub ts: SlackTs,
    /// Author of the reply
    #[serde(default)]
    pub user: String,
}

impl ReplyStub {
    /// Creates a reply stub.
    pub fn new(ts: impl Into<SlackTs>, user: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            user: user.into(),
        }
    }
}

/// Reply-thread metadata carried by a thread parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    /// Timestamp identifying the thread
    pub thread_ts: SlackTs,
    /// Reply count as stated by the export
    pub reply_count: u64,
    /// Stubs of the replies, in export order
    pub replies: Vec<ReplyStub>,
}

/// One `"message"` record from a day file.
///
/// | Field | Required | Description |
/// |-------|----------|-------------|
/// | `ts` | yes | Post time; unique within a file and used as identity |
/// | `msg_type` | yes | Always `"message"` after filtering |
/// | `user` | yes | Author identifier |
/// | `text` | yes | Body, may be empty |
/// | `subtype` | no | Slack subtype such as `channel_join` |
/// | `files` | no | Uploaded files |
/// | `attachments` | no | Unfurls and shared messages |
/// | `reactions` | no | Emoji reactions |
/// | `thread` | no | Present when the record is a thread parent |
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub ts: SlackTs,
    pub msg_type: String,
    pub user: String,
    pub text: String,
    pub subtype: Option<String>,
    pub files: Option<Vec<FileUpload>>,
    pub attachments: Option<Vec<Attachment>>,
    pub reactions: Option<Vec<Reaction>>,
    pub thread: Option<Thread>,
}

impl MessageRecord {
    /// Creates a plain message with no optional fields.
    pub fn new(ts: impl Into<SlackTs>, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            msg_type: "message".to_string(),
            user: user.into(),
            text: text.into(),
            subtype: None,
            files: None,
            attachments: None,
            reactions: None,
            thread: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn with_files(mut self, files: Vec<FileUpload>) -> Self {
        self.files = Some(files);
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = Some(reactions);
        self
    }

    /// Marks this record as a thread parent.
    #[must_use]
    pub fn with_replies(
        mut self,
        thread_ts: impl Into<SlackTs>,
        reply_count: u64,
        replies: Vec<ReplyStub>,
    ) -> Self {
        self.thread = Some(Thread {
            thread_ts: thread_ts.into(),
            reply_count,
            replies,
        });
        self
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if this record carries reply stubs.
    pub fn is_thread_parent(&self) -> bool {
        self.thread.is_some()
    }

    /// Iterates over the timestamps this record's reply stubs point at.
    pub fn reply_targets(&self) -> impl Iterator<Item = &SlackTs> {
        self.thread
            .iter()
            .flat_map(|thread| thread.replies.iter().map(|stub| &stub.ts))
    }
}
