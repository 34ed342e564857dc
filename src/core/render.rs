//! Rendered message content and its two presentations.
//!
//! The formatter builds one [`RenderedMessage`]: lines of tagged
//! [`Segment`]s. [`RenderedMessage::to_plain`] and
//! [`RenderedMessage::to_styled`] both walk that same structure, so the file
//! output and the console output can only differ in ANSI escape codes.
//!
//! # Example
//!
//! ```rust
//! use slackpack::core::render::{RenderedLine, RenderedMessage, strip_ansi};
//!
//! let mut message = RenderedMessage::new();
//! message.push(
//!     RenderedLine::new(0)
//!         .timestamp("[2025-04-12 11:03:34.517349]")
//!         .text(": hello"),
//! );
//!
//! assert_eq!(message.to_plain(), "[2025-04-12 11:03:34.517349]: hello");
//! assert_eq!(strip_ansi(&message.to_styled()), message.to_plain());
//! ```

use std::sync::LazyLock;

use regex::Regex;

const RESET: &str = "\x1b[0m";

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI escape pattern is valid")
});

/// What a piece of text is, for styling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Undecorated text
    Text,
    /// A rendered timestamp (bold yellow)
    Timestamp,
    /// A user identifier or display name (cyan)
    User,
    /// A reaction name or count (red)
    Reaction,
}

impl SegmentKind {
    /// ANSI prefix for this kind; empty for plain text.
    pub fn ansi_prefix(self) -> &'static str {
        match self {
            SegmentKind::Text => "",
            SegmentKind::Timestamp => "\x1b[1m\x1b[33m",
            SegmentKind::User => "\x1b[36m",
            SegmentKind::Reaction => "\x1b[31m",
        }
    }
}

/// A run of text with a single kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn write_plain(&self, out: &mut String) {
        out.push_str(&self.text);
    }

    fn write_styled(&self, out: &mut String) {
        match self.kind {
            SegmentKind::Text => out.push_str(&self.text),
            kind => {
                out.push_str(kind.ansi_prefix());
                out.push_str(&self.text);
                out.push_str(RESET);
            }
        }
    }
}

/// One output line: an indent and a sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedLine {
    pub indent: usize,
    pub segments: Vec<Segment>,
}

impl RenderedLine {
    /// Starts a line indented by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.segment(SegmentKind::Text, text)
    }

    #[must_use]
    pub fn timestamp(self, text: impl Into<String>) -> Self {
        self.segment(SegmentKind::Timestamp, text)
    }

    #[must_use]
    pub fn user(self, text: impl Into<String>) -> Self {
        self.segment(SegmentKind::User, text)
    }

    #[must_use]
    pub fn reaction(self, text: impl Into<String>) -> Self {
        self.segment(SegmentKind::Reaction, text)
    }

    #[must_use]
    pub fn segment(mut self, kind: SegmentKind, text: impl Into<String>) -> Self {
        self.segments.push(Segment::new(kind, text));
        self
    }

    /// Concatenated segment text, without indent or styling.
    pub fn content(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A fully formatted message: base line plus any sub-section lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedMessage {
    lines: Vec<RenderedLine>,
}

impl RenderedMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: RenderedLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rewrites the text of every segment, keeping kinds and layout.
    pub fn map_text<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for segment in self.lines.iter_mut().flat_map(|l| l.segments.iter_mut()) {
            segment.text = f(&segment.text);
        }
    }

    /// Undecorated rendering, lines joined with `\n`, no trailing newline.
    pub fn to_plain(&self) -> String {
        self.render_with(Segment::write_plain)
    }

    /// ANSI-styled rendering with the same content as [`to_plain`](Self::to_plain).
    pub fn to_styled(&self) -> String {
        self.render_with(Segment::write_styled)
    }

    fn render_with(&self, write: fn(&Segment, &mut String)) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(std::iter::repeat_n(' ', line.indent));
            for segment in &line.segments {
                write(segment, &mut out);
            }
        }
        out
    }
}

/// Removes ANSI SGR escape sequences from `s`.
pub fn strip_ansi(s: &str) -> String {
    ANSI_ESCAPE.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderedMessage {
        let mut message = RenderedMessage::new();
        message.push(
            RenderedLine::new(0)
                .timestamp("[ts]")
                .text(": message - NO SUBTYPE ")
                .user("<U1>")
                .text(": hi"),
        );
        message.push(RenderedLine::new(4).text("Reaction name: ").reaction("tada"));
        message.push(RenderedLine::new(8).user("<U2>"));
        message
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(
            sample().to_plain(),
            "[ts]: message - NO SUBTYPE <U1>: hi\n    Reaction name: tada\n        <U2>"
        );
    }

    #[test]
    fn test_styled_rendering_wraps_tagged_segments() {
        let styled = sample().to_styled();
        assert!(styled.starts_with("\x1b[1m\x1b[33m[ts]\x1b[0m"));
        assert!(styled.contains("\x1b[36m<U1>\x1b[0m"));
        assert!(styled.contains("\x1b[31mtada\x1b[0m"));
    }

    #[test]
    fn test_styled_and_plain_share_content() {
        let message = sample();
        assert_eq!(strip_ansi(&message.to_styled()), message.to_plain());
    }

    #[test]
    fn test_map_text_applies_to_every_segment() {
        let mut message = sample();
        message.map_text(|t| t.replace("U", "X"));
        assert!(message.to_plain().contains("<X1>"));
        assert!(message.to_plain().contains("<X2>"));
        assert_eq!(message.lines()[1].segments[1].kind, SegmentKind::Reaction);
    }

    #[test]
    fn test_line_content() {
        let line = RenderedLine::new(4).text("a").user("b").timestamp("c");
        assert_eq!(line.content(), "abc");
    }

    #[test]
    fn test_empty_message() {
        let message = RenderedMessage::new();
        assert!(message.is_empty());
        assert_eq!(message.to_plain(), "");
    }

    #[test]
    fn test_strip_ansi_leaves_plain_text() {
        assert_eq!(strip_ansi("no escapes [here]"), "no escapes [here]");
    }
}
