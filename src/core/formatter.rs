//! Formatting of a single message record.
//!
//! [`MessageFormatter::render`] turns one [`MessageRecord`] into a
//! [`RenderedMessage`] laid out as:
//!
//! ```text
//! [2025-04-12 11:03:34.517349]: message - FILE UPLOAD <U1>: see attached
//!     File: [2025-04-12 11:03:30.000000] - plan.pdf of type PDF
//!     Attachment: 2025-04-10 09:00:00.000000 - <Bob>: original post
//!     Reaction name: eyes
//!     Reaction Count: 1
//!         <U2>
//! Reply thread timestamp: [2025-04-12 11:03:34.517349]
//! Reply Count: 1
//!     [2025-04-12 11:05:00.000000] U2: on it
//! ```
//!
//! Sections appear in that order (files, attachments, reactions, replies)
//! and only when the record carries them. Identity substitution runs last,
//! over every segment.

use crate::config::RenderConfig;
use crate::core::collection::RecordCollection;
use crate::core::identity::IdentityMap;
use crate::core::render::{RenderedLine, RenderedMessage, Segment, SegmentKind};
use crate::core::timestamp::TimestampFormatter;
use crate::error::Result;
use crate::message::{Attachment, FileUpload, MessageRecord, Reaction, Thread};

/// Subtype shown when the record has none.
pub const NO_SUBTYPE: &str = "NO SUBTYPE";
/// Subtype shown for records with `files`.
pub const FILE_UPLOAD: &str = "FILE UPLOAD";
/// Subtype shown for records with `attachments`.
pub const ATTACHMENTS: &str = "ATTACHMENTS";

const SECTION_INDENT: usize = 4;
const NESTED_INDENT: usize = 8;

/// The subtype label for a record.
///
/// Starts from the record's own subtype (or [`NO_SUBTYPE`]), then `files`
/// overrides it with [`FILE_UPLOAD`], then `attachments` overrides that with
/// [`ATTACHMENTS`]. A record with both ends up as `ATTACHMENTS`.
pub fn effective_subtype(record: &MessageRecord) -> &str {
    let mut subtype = record.subtype.as_deref().unwrap_or(NO_SUBTYPE);
    if record.files.is_some() {
        subtype = FILE_UPLOAD;
    }
    if record.attachments.is_some() {
        subtype = ATTACHMENTS;
    }
    subtype
}

/// The result of rendering one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Formatted content
    pub message: RenderedMessage,
    /// Reply stubs that matched no available record
    pub unresolved: Vec<String>,
}

impl Rendered {
    /// Undecorated text, as written to the output file.
    pub fn plain(&self) -> String {
        self.message.to_plain()
    }

    /// ANSI-styled text, as streamed to the console.
    pub fn styled(&self) -> String {
        self.message.to_styled()
    }
}

/// Renders message records into text.
///
/// Holds the shared identity map and the timestamp settings; cheap to create
/// per file.
#[derive(Debug, Clone)]
pub struct MessageFormatter<'a> {
    identities: &'a IdentityMap,
    timestamps: TimestampFormatter,
}

impl<'a> MessageFormatter<'a> {
    pub fn new(identities: &'a IdentityMap, config: &RenderConfig) -> Self {
        Self {
            identities,
            timestamps: TimestampFormatter::from_config(config),
        }
    }

    /// Renders `record`, consuming its thread replies from `collection`.
    ///
    /// Every reply stub that resolves marks its full record as consumed, so
    /// the assembler will not render it again at top level. Stubs that do not
    /// resolve are logged, rendered with empty text and listed in
    /// [`Rendered::unresolved`].
    ///
    /// Fails only when a timestamp cannot be parsed.
    pub fn render(
        &self,
        record: &MessageRecord,
        collection: &mut RecordCollection,
    ) -> Result<Rendered> {
        let mut message = RenderedMessage::new();
        let mut unresolved = Vec::new();

        let ts = self.timestamps.format(&record.ts)?;
        message.push(
            RenderedLine::new(0)
                .timestamp(format!("[{ts}]"))
                .text(format!(
                    ": {} - {} ",
                    record.msg_type,
                    effective_subtype(record)
                ))
                .user(format!("<{}>", record.user))
                .text(format!(": {}", record.text)),
        );

        if let Some(files) = &record.files {
            for file in files {
                message.push(self.file_line(file)?);
            }
        }

        if let Some(attachments) = &record.attachments {
            let mut block = Vec::new();
            for attachment in attachments {
                block.extend(self.attachment_lines(attachment)?);
            }
            // One labelled block per message, however many attachments
            if let Some(first) = block.first_mut() {
                first
                    .segments
                    .insert(0, Segment::new(SegmentKind::Text, "Attachment: "));
            }
            for line in block {
                message.push(line);
            }
        }

        if let Some(reactions) = &record.reactions {
            for reaction in reactions {
                self.push_reaction(&mut message, reaction);
            }
        }

        if let Some(thread) = &record.thread {
            self.push_thread(&mut message, thread, collection, &mut unresolved)?;
        }

        message.map_text(|text| self.identities.substitute(text).into_owned());

        Ok(Rendered {
            message,
            unresolved,
        })
    }

    fn file_line(&self, file: &FileUpload) -> Result<RenderedLine> {
        let line = RenderedLine::new(SECTION_INDENT).text("File: ");
        if file.is_tombstone() {
            return Ok(line.text("DELETED"));
        }

        let line = match &file.timestamp {
            Some(ts) => line
                .timestamp(format!("[{}]", self.timestamps.format(ts)?))
                .text(" - "),
            None => line,
        };
        Ok(line.text(format!(
            "{} of type {}",
            file.name.as_deref().unwrap_or_default(),
            file.pretty_type.as_deref().unwrap_or_default()
        )))
    }

    /// Lines for one attachment; empty when it has neither `ts` nor `from_url`.
    ///
    /// A shared message (`ts`) renders as `{time} - <{author}>: {text}`; an unfurl
    /// (`from_url`) renders as `URL - {url}` followed by the fallback and
    /// text lines. An attachment with both renders both.
    fn attachment_lines(&self, attachment: &Attachment) -> Result<Vec<RenderedLine>> {
        let mut lines = Vec::new();

        if let Some(ts) = &attachment.ts {
            lines.push(
                RenderedLine::new(SECTION_INDENT)
                    .timestamp(self.timestamps.format(ts)?)
                    .text(" - ")
                    .user(format!(
                        "<{}>",
                        attachment.author_name.as_deref().unwrap_or_default()
                    ))
                    .text(format!(
                        ": {}",
                        attachment.text.as_deref().unwrap_or_default()
                    )),
            );
        }

        if let Some(url) = &attachment.from_url {
            lines.push(RenderedLine::new(SECTION_INDENT).text(format!("URL - {url}")));
            for extra in [&attachment.fallback, &attachment.text].into_iter().flatten() {
                lines.push(RenderedLine::new(SECTION_INDENT).text(extra.clone()));
            }
        }

        Ok(lines)
    }

    fn push_reaction(&self, message: &mut RenderedMessage, reaction: &Reaction) {
        message.push(
            RenderedLine::new(SECTION_INDENT)
                .text("Reaction name: ")
                .reaction(reaction.name.clone()),
        );
        message.push(
            RenderedLine::new(SECTION_INDENT)
                .text("Reaction Count: ")
                .reaction(reaction.count().to_string()),
        );
        for id in &reaction.users {
            let name = self.identities.substitute(id);
            let shown: &str = if name.is_empty() { id } else { name.as_ref() };
            message.push(RenderedLine::new(NESTED_INDENT).user(format!("<{shown}>")));
        }
    }

    fn push_thread(
        &self,
        message: &mut RenderedMessage,
        thread: &Thread,
        collection: &mut RecordCollection,
        unresolved: &mut Vec<String>,
    ) -> Result<()> {
        message.push(
            RenderedLine::new(0)
                .text("Reply thread timestamp: ")
                .timestamp(format!("[{}]", self.timestamps.format(&thread.thread_ts)?)),
        );
        message.push(RenderedLine::new(0).text(format!("Reply Count: {}", thread.reply_count)));

        for stub in &thread.replies {
            let ts = self.timestamps.format(&stub.ts)?;
            let reply_text = match collection.consume_reply(&stub.ts) {
                Ok(reply) => reply.text.clone(),
                Err(err) => {
                    log::warn!("{err}");
                    unresolved.push(stub.ts.to_string());
                    String::new()
                }
            };
            message.push(
                RenderedLine::new(SECTION_INDENT)
                    .timestamp(format!("[{ts}]"))
                    .text(" ")
                    .user(stub.user.clone())
                    .text(format!(": {reply_text}")),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeZoneMode;
    use crate::core::render::strip_ansi;
    use crate::message::{ReplyStub, SlackTs};

    fn config() -> RenderConfig {
        RenderConfig::new().with_timezone(TimeZoneMode::Utc)
    }

    fn render_one(record: &MessageRecord, identities: &IdentityMap) -> Rendered {
        let mut collection = RecordCollection::default();
        MessageFormatter::new(identities, &config())
            .render(record, &mut collection)
            .unwrap()
    }

    #[test]
    fn test_base_line_only() {
        let record = MessageRecord::new("1.0", "U1", "hello");
        let rendered = render_one(&record, &IdentityMap::empty());
        assert_eq!(
            rendered.plain(),
            "[1970-01-01 00:00:01.000000]: message - NO SUBTYPE <U1>: hello"
        );
        assert_eq!(rendered.message.len(), 1);
        assert!(rendered.unresolved.is_empty());
    }

    #[test]
    fn test_record_subtype_is_kept() {
        let record = MessageRecord::new("1.0", "U1", "joined").with_subtype("channel_join");
        assert_eq!(effective_subtype(&record), "channel_join");
    }

    #[test]
    fn test_subtype_precedence() {
        let files = MessageRecord::new("1.0", "U1", "").with_files(vec![FileUpload::default()]);
        assert_eq!(effective_subtype(&files), FILE_UPLOAD);

        let both = files.clone().with_attachments(vec![Attachment::default()]);
        assert_eq!(effective_subtype(&both), ATTACHMENTS);

        let empty_files = MessageRecord::new("1.0", "U1", "").with_files(vec![]);
        assert_eq!(effective_subtype(&empty_files), FILE_UPLOAD);
    }

    #[test]
    fn test_tombstone_file() {
        let record = MessageRecord::new("1.0", "U1", "").with_files(vec![FileUpload {
            mode: Some("tombstone".into()),
            ..FileUpload::default()
        }]);
        let plain = render_one(&record, &IdentityMap::empty()).plain();
        assert!(plain.contains("- FILE UPLOAD <U1>"));
        assert!(plain.ends_with("\n    File: DELETED"));
    }

    #[test]
    fn test_hosted_file() {
        let record = MessageRecord::new("1.0", "U1", "report").with_files(vec![FileUpload {
            mode: Some("hosted".into()),
            timestamp: Some(SlackTs::from("60")),
            name: Some("plan.pdf".into()),
            pretty_type: Some("PDF".into()),
        }]);
        let plain = render_one(&record, &IdentityMap::empty()).plain();
        assert!(plain.contains("\n    File: [1970-01-01 00:01:00.000000] - plan.pdf of type PDF"));
    }

    #[test]
    fn test_file_without_timestamp() {
        let record = MessageRecord::new("1.0", "U1", "").with_files(vec![FileUpload {
            name: Some("a.txt".into()),
            pretty_type: Some("Plain Text".into()),
            ..FileUpload::default()
        }]);
        let plain = render_one(&record, &IdentityMap::empty()).plain();
        assert!(plain.ends_with("\n    File: a.txt of type Plain Text"));
    }

    #[test]
    fn test_shared_message_attachment() {
        let record = MessageRecord::new("1.0", "U1", "fwd").with_attachments(vec![Attachment {
            ts: Some(SlackTs::from("2")),
            author_name: Some("Bob".into()),
            text: Some("original".into()),
            ..Attachment::default()
        }]);
        let plain = render_one(&record, &IdentityMap::empty()).plain();
        assert!(plain.contains("- ATTACHMENTS <U1>: fwd"));
        assert!(plain.ends_with("\n    Attachment: 1970-01-01 00:00:02.000000 - <Bob>: original"));
    }

    #[test]
    fn test_link_attachment() {
        let record = MessageRecord::new("1.0", "U1", "look").with_attachments(vec![Attachment {
            from_url: Some("https://example.com".into()),
            fallback: Some("Example Domain".into()),
            text: Some("An example".into()),
            ..Attachment::default()
        }]);
        let plain = render_one(&record, &IdentityMap::empty()).plain();
        assert!(plain.ends_with(
            "\n    Attachment: URL - https://example.com\n    Example Domain\n    An example"
        ));
    }

    #[test]
    fn test_attachment_with_both_and_neither() {
        let record = MessageRecord::new("1.0", "U1", "").with_attachments(vec![
            Attachment::default(),
            Attachment {
                ts: Some(SlackTs::from("2")),
                author_name: Some("Bob".into()),
                text: Some("body".into()),
                from_url: Some("https://x.test".into()),
                fallback: None,
            },
        ]);
        let rendered = render_one(&record, &IdentityMap::empty());
        let lines: Vec<String> = rendered.plain().lines().map(String::from).collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("    Attachment: 1970-01-01"));
        assert_eq!(lines[2], "    URL - https://x.test");
        assert_eq!(lines[3], "    body");
    }

    #[test]
    fn test_attachment_label_once_per_message() {
        let link = |url: &str| Attachment {
            from_url: Some(url.into()),
            ..Attachment::default()
        };
        let record = MessageRecord::new("1.0", "U1", "")
            .with_attachments(vec![link("https://a"), link("https://b")]);
        let plain = render_one(&record, &IdentityMap::empty()).plain();

        assert_eq!(plain.matches("Attachment: ").count(), 1);
        assert!(plain.ends_with("\n    Attachment: URL - https://a\n    URL - https://b"));
    }

    #[test]
    fn test_reactions_with_identity_lookup() {
        let identities = IdentityMap::from_pairs([("U2", "Bob")]);
        let record = MessageRecord::new("1.0", "U1", "nice").with_reactions(vec![Reaction {
            name: "tada".into(),
            count: Some(2),
            users: vec!["U2".into(), "U3".into()],
        }]);
        let plain = render_one(&record, &identities).plain();
        assert!(plain.ends_with(
            "\n    Reaction name: tada\n    Reaction Count: 2\n        <Bob>\n        <U3>"
        ));
    }

    #[test]
    fn test_thread_consumes_replies() {
        let mut collection = RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "hello")
                .with_replies("1.0", 1, vec![ReplyStub::new("2.0", "U2")]),
            MessageRecord::new("2.0", "U2", "hi"),
        ]);
        let parent = collection.available(0).cloned().unwrap();
        let rendered = MessageFormatter::new(&IdentityMap::empty(), &config())
            .render(&parent, &mut collection)
            .unwrap();

        assert_eq!(
            rendered.plain(),
            "[1970-01-01 00:00:01.000000]: message - NO SUBTYPE <U1>: hello\n\
             Reply thread timestamp: [1970-01-01 00:00:01.000000]\n\
             Reply Count: 1\n    \
             [1970-01-01 00:00:02.000000] U2: hi"
        );
        assert!(collection.is_consumed(&SlackTs::from("2.0")));
    }

    #[test]
    fn test_unresolved_reply_degrades_to_empty_text() {
        let record =
            MessageRecord::new("1.0", "U1", "hello").with_replies("1.0", 1, vec![ReplyStub::new(
                "9.0", "U9",
            )]);
        let rendered = render_one(&record, &IdentityMap::empty());
        assert!(rendered.plain().ends_with("\n    [1970-01-01 00:00:09.000000] U9: "));
        assert_eq!(rendered.unresolved, vec!["9.0".to_string()]);
    }

    #[test]
    fn test_substitution_reaches_every_section() {
        let identities = IdentityMap::from_pairs([("U1", "Alice"), ("U2", "Bob")]);
        let mut collection = RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "U1 said hi")
                .with_attachments(vec![Attachment {
                    ts: Some(SlackTs::from("1")),
                    author_name: Some("U2".into()),
                    text: Some("quoting U2".into()),
                    ..Attachment::default()
                }])
                .with_replies("1.0", 1, vec![ReplyStub::new("2.0", "U2")]),
            MessageRecord::new("2.0", "U2", "thanks U1"),
        ]);
        let parent = collection.available(0).cloned().unwrap();
        let plain = MessageFormatter::new(&identities, &config())
            .render(&parent, &mut collection)
            .unwrap()
            .plain();

        assert!(plain.contains("<Alice>: Alice said hi"));
        assert!(plain.contains("<Bob>: quoting Bob"));
        assert!(plain.contains("Bob: thanks Alice"));
        assert!(!plain.contains("U1"));
        assert!(!plain.contains("U2"));
    }

    #[test]
    fn test_styled_matches_plain_content() {
        let identities = IdentityMap::from_pairs([("U2", "Bob")]);
        let record = MessageRecord::new("1.0", "U1", "hello")
            .with_reactions(vec![Reaction {
                name: "eyes".into(),
                count: None,
                users: vec!["U2".into()],
            }])
            .with_replies("1.0", 1, vec![ReplyStub::new("3.0", "U2")]);
        let rendered = render_one(&record, &identities);

        let styled = rendered.styled();
        assert!(styled.contains("\x1b[1m\x1b[33m[1970-01-01 00:00:01.000000]\x1b[0m"));
        assert!(styled.contains("\x1b[36m<Bob>\x1b[0m"));
        assert!(styled.contains("\x1b[31meyes\x1b[0m"));
        assert_eq!(strip_ansi(&styled), rendered.plain());
    }

    #[test]
    fn test_invalid_timestamp_is_fatal() {
        let record = MessageRecord::new("yesterday", "U1", "hello");
        let mut collection = RecordCollection::default();
        let err = MessageFormatter::new(&IdentityMap::empty(), &config())
            .render(&record, &mut collection)
            .unwrap_err();
        assert!(err.is_invalid_timestamp());
    }
}
