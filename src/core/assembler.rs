//! Per-file transcript assembly.
//!
//! [`TranscriptAssembler::assemble`] renders every top-level message of one
//! day file in file order, skipping records that an earlier thread parent
//! already consumed as a reply. Plain text is collected for the output file;
//! the console rendering is written to a caller-supplied sink as each message
//! is produced.

use std::io::Write;

use crate::config::RenderConfig;
use crate::core::collection::RecordCollection;
use crate::core::formatter::MessageFormatter;
use crate::core::identity::IdentityMap;
use crate::error::Result;

/// The plain-text transcript of one day file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTranscript {
    /// The file name followed by one entry per rendered message
    pub lines: Vec<String>,
    /// Top-level messages rendered
    pub messages: usize,
    /// Records shown under a thread instead of at top level
    pub replies_folded: usize,
    /// Reply stubs with no matching record
    pub unresolved_replies: usize,
}

impl FileTranscript {
    /// Joins the lines, each terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Renders whole day files.
#[derive(Debug, Clone)]
pub struct TranscriptAssembler<'a> {
    formatter: MessageFormatter<'a>,
    config: RenderConfig,
}

impl<'a> TranscriptAssembler<'a> {
    pub fn new(identities: &'a IdentityMap, config: &RenderConfig) -> Self {
        Self {
            formatter: MessageFormatter::new(identities, config),
            config: config.clone(),
        }
    }

    /// Renders `collection` under the heading `name`.
    ///
    /// The first line of the result is `name`. The console receives a blank
    /// line, `name`, a blank line, then each message (styled when the config
    /// enables color) as soon as it is rendered.
    pub fn assemble<W: Write>(
        &self,
        name: &str,
        mut collection: RecordCollection,
        console: &mut W,
    ) -> Result<FileTranscript> {
        let mut transcript = FileTranscript {
            lines: vec![name.to_string()],
            ..FileTranscript::default()
        };
        writeln!(console, "\n{name}\n")?;

        for pos in collection.snapshot() {
            let Some(record) = collection.available(pos).cloned() else {
                continue;
            };
            let rendered = self
                .formatter
                .render(&record, &mut collection)
                .map_err(|e| e.at_record(pos))?;

            if self.config.color {
                writeln!(console, "{}", rendered.styled())?;
            } else {
                writeln!(console, "{}", rendered.plain())?;
            }
            transcript.lines.push(rendered.plain());
            transcript.messages += 1;
            transcript.unresolved_replies += rendered.unresolved.len();
        }
        transcript.replies_folded = collection.consumed_count();

        log::log!(
            self.config.progress_level(),
            "{name}: {} messages, {} replies folded into threads",
            transcript.messages,
            transcript.replies_folded
        );
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeZoneMode;
    use crate::message::{MessageRecord, ReplyStub};

    fn config() -> RenderConfig {
        RenderConfig::new()
            .with_timezone(TimeZoneMode::Utc)
            .with_color(false)
    }

    fn thread_collection() -> RecordCollection {
        RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "hello")
                .with_replies("1.0", 1, vec![ReplyStub::new("2.0", "U2")]),
            MessageRecord::new("2.0", "U2", "hi"),
        ])
    }

    #[test]
    fn test_reply_rendered_once_under_parent() {
        let identities = IdentityMap::empty();
        let mut console = Vec::new();
        let transcript = TranscriptAssembler::new(&identities, &config())
            .assemble("2024-01-15.json", thread_collection(), &mut console)
            .unwrap();

        assert_eq!(transcript.lines.len(), 2);
        assert_eq!(transcript.lines[0], "2024-01-15.json");
        assert!(transcript.lines[1].starts_with("[1970-01-01 00:00:01.000000]"));
        assert!(transcript.lines[1].ends_with("\n    [1970-01-01 00:00:02.000000] U2: hi"));
        assert_eq!(transcript.messages, 1);
        assert_eq!(transcript.replies_folded, 1);
        assert_eq!(transcript.unresolved_replies, 0);

        let text = transcript.to_text();
        assert_eq!(text.matches("hi").count(), 1);
    }

    #[test]
    fn test_console_receives_same_content() {
        let identities = IdentityMap::empty();
        let mut console = Vec::new();
        let transcript = TranscriptAssembler::new(&identities, &config())
            .assemble("day.json", thread_collection(), &mut console)
            .unwrap();

        let console = String::from_utf8(console).unwrap();
        assert_eq!(console, format!("\nday.json\n\n{}\n", transcript.lines[1]));
    }

    #[test]
    fn test_styled_console() {
        let identities = IdentityMap::empty();
        let mut console = Vec::new();
        let config = config().with_color(true);
        let transcript = TranscriptAssembler::new(&identities, &config)
            .assemble("day.json", thread_collection(), &mut console)
            .unwrap();

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("\x1b[1m\x1b[33m"));
        assert!(!transcript.lines[1].contains('\x1b'));
    }

    #[test]
    fn test_empty_collection_emits_heading_only() {
        let identities = IdentityMap::empty();
        let transcript = TranscriptAssembler::new(&identities, &config())
            .assemble("empty.json", RecordCollection::default(), &mut std::io::sink())
            .unwrap();
        assert_eq!(transcript.lines, vec!["empty.json".to_string()]);
        assert_eq!(transcript.to_text(), "empty.json\n");
    }

    #[test]
    fn test_reply_listed_before_parent_is_still_rendered_first() {
        let identities = IdentityMap::empty();
        let collection = RecordCollection::new(vec![
            MessageRecord::new("2.0", "U2", "early reply"),
            MessageRecord::new("1.0", "U1", "parent")
                .with_replies("1.0", 1, vec![ReplyStub::new("2.0", "U2")]),
        ]);
        let transcript = TranscriptAssembler::new(&identities, &config())
            .assemble("day.json", collection, &mut std::io::sink())
            .unwrap();

        assert_eq!(transcript.messages, 2);
        assert!(transcript.lines[2].ends_with("U2: early reply"));
        assert_eq!(transcript.unresolved_replies, 0);
    }

    #[test]
    fn test_invalid_timestamp_names_record() {
        let identities = IdentityMap::empty();
        let collection = RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "fine"),
            MessageRecord::new("later", "U1", "broken"),
        ]);
        let err = TranscriptAssembler::new(&identities, &config())
            .assemble("day.json", collection, &mut std::io::sink())
            .unwrap_err();

        assert!(err.is_invalid_timestamp());
        assert!(err.to_string().contains("'later' in record #1"));
    }

    #[test]
    fn test_reply_claimed_by_two_parents() {
        let identities = IdentityMap::empty();
        let collection = RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "first")
                .with_replies("1.0", 1, vec![ReplyStub::new("3.0", "U3")]),
            MessageRecord::new("2.0", "U2", "second")
                .with_replies("2.0", 1, vec![ReplyStub::new("3.0", "U3")]),
            MessageRecord::new("3.0", "U3", "shared"),
        ]);
        let transcript = TranscriptAssembler::new(&identities, &config())
            .assemble("day.json", collection, &mut std::io::sink())
            .unwrap();

        assert_eq!(transcript.messages, 2);
        assert_eq!(transcript.unresolved_replies, 1);
        assert_eq!(transcript.to_text().matches("shared").count(), 1);
    }
}
