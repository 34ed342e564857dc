//! Plain-text transcript writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::assembler::FileTranscript;
use crate::error::{Result, SlackpackError};

/// Writes the transcripts of all day files to one UTF-8 text file.
///
/// # Format
/// - One segment per day file, in the given order
/// - Each segment: the file name, then one block per message
/// - Every line, including the last, ends with `\n`
pub fn write_text(transcripts: &[FileTranscript], output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(|e| SlackpackError::output_write(output_path, e))?;
    let mut writer = BufWriter::new(file);

    for transcript in transcripts {
        writer
            .write_all(transcript.to_text().as_bytes())
            .map_err(|e| SlackpackError::output_write(output_path, e))?;
    }

    writer
        .flush()
        .map_err(|e| SlackpackError::output_write(output_path, e))
}

/// Converts transcripts to the text [`write_text`] would produce.
pub fn to_text(transcripts: &[FileTranscript]) -> String {
    transcripts.iter().map(FileTranscript::to_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn transcripts() -> Vec<FileTranscript> {
        vec![
            FileTranscript {
                lines: vec!["a.json".into(), "[t]: first".into()],
                ..FileTranscript::default()
            },
            FileTranscript {
                lines: vec!["b.json".into(), "[t]: second\n    File: DELETED".into()],
                ..FileTranscript::default()
            },
        ]
    }

    #[test]
    fn test_to_text() {
        assert_eq!(
            to_text(&transcripts()),
            "a.json\n[t]: first\nb.json\n[t]: second\n    File: DELETED\n"
        );
    }

    #[test]
    fn test_write_text_matches_to_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_text(&transcripts(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), to_text(&transcripts()));
    }

    #[test]
    fn test_write_text_into_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_text(&transcripts(), &path).unwrap_err();
        assert!(matches!(err, SlackpackError::OutputWrite { .. }));
        assert_eq!(err.exit_code(), 5);
    }
}
