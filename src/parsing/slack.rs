//! Slack day-file parsing.
//!
//! A channel export holds one JSON file per day, each a top-level array of
//! event objects. Only objects of type `"message"` are kept; they are
//! validated into [`MessageRecord`]s.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::collection::RecordCollection;
use crate::error::{Result, SlackpackError};
use crate::message::{Attachment, FileUpload, MessageRecord, Reaction, ReplyStub, SlackTs, Thread};

/// Raw Slack event structure for deserialization.
///
/// Every field is optional here so that a missing required field surfaces as
/// a [`SlackpackError::MalformedRecord`] naming the field, rather than as an
/// opaque serde error.
#[derive(Debug, Default, Deserialize)]
pub struct SlackRawRecord {
    /// Event type (we only care about "message")
    #[serde(rename = "type")]
    pub msg_type: Option<String>,
    /// Post time, string or number
    pub ts: Option<SlackTs>,
    /// Author identifier
    pub user: Option<String>,
    /// Message body
    pub text: Option<String>,
    pub subtype: Option<String>,
    pub files: Option<Vec<FileUpload>>,
    pub attachments: Option<Vec<Attachment>>,
    pub reactions: Option<Vec<Reaction>>,
    /// Thread identity, set on parents and replies alike
    pub thread_ts: Option<SlackTs>,
    pub reply_count: Option<u64>,
    /// Reply stubs, only on thread parents
    pub replies: Option<Vec<ReplyStub>>,
}

/// Validates a raw event into a [`MessageRecord`].
///
/// Returns `Ok(None)` for events that are not messages, and an error when the
/// event has no `type` or a message lacks `ts`, `user` or `text`.
///
/// `index` is the event's position in its file, used for diagnostics only.
pub fn parse_slack_record(raw: SlackRawRecord, index: usize) -> Result<Option<MessageRecord>> {
    let msg_type = raw
        .msg_type
        .ok_or_else(|| SlackpackError::malformed_record(index, "type"))?;
    if msg_type != "message" {
        return Ok(None);
    }

    let ts = raw
        .ts
        .ok_or_else(|| SlackpackError::malformed_record(index, "ts"))?;
    let user = raw
        .user
        .ok_or_else(|| SlackpackError::malformed_record(index, "user"))?;
    let text = raw
        .text
        .ok_or_else(|| SlackpackError::malformed_record(index, "text"))?;

    // A parent's thread_ts equals its own ts; fall back to it when omitted.
    let thread = raw.replies.map(|replies| Thread {
        thread_ts: raw.thread_ts.unwrap_or_else(|| ts.clone()),
        reply_count: raw.reply_count.unwrap_or(replies.len() as u64),
        replies,
    });

    Ok(Some(MessageRecord {
        ts,
        msg_type,
        user,
        text,
        subtype: raw.subtype,
        files: raw.files,
        attachments: raw.attachments,
        reactions: raw.reactions,
        thread,
    }))
}

/// Parser for Slack channel day files.
///
/// A day file looks like:
/// ```json
/// [
///   {
///     "type": "message",
///     "ts": "1744455814.517349",
///     "user": "U01ABCDEF",
///     "text": "Hello <@U02GHIJKL>",
///     "reactions": [{"name": "tada", "count": 1, "users": ["U02GHIJKL"]}],
///     "thread_ts": "1744455814.517349",
///     "reply_count": 1,
///     "replies": [{"user": "U02GHIJKL", "ts": "1744455900.000100"}]
///   }
/// ]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DayFileParser;

impl DayFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Reads and parses a day file.
    ///
    /// Read failures, JSON errors and malformed records all carry the file path.
    pub fn parse(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        let content = fs::read_to_string(path).map_err(|e| SlackpackError::read(path, e))?;
        let raw: Vec<SlackRawRecord> =
            serde_json::from_str(&content).map_err(|e| SlackpackError::parse(path, e))?;
        self.parse_records(raw).map_err(|e| e.in_file(path))
    }

    /// Reads a day file straight into a [`RecordCollection`].
    pub fn load_collection(&self, path: &Path) -> Result<RecordCollection> {
        self.parse(path).map(RecordCollection::new)
    }

    /// Parses day-file content held in memory.
    pub fn parse_str(&self, content: &str) -> Result<Vec<MessageRecord>> {
        let raw: Vec<SlackRawRecord> = serde_json::from_str(content)?;
        self.parse_records(raw)
    }

    fn parse_records(&self, raw: Vec<SlackRawRecord>) -> Result<Vec<MessageRecord>> {
        let mut records = Vec::with_capacity(raw.len());
        for (index, item) in raw.into_iter().enumerate() {
            if let Some(record) = parse_slack_record(item, index)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}
