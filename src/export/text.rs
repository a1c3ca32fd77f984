//! Console summary renderer.

use std::io::Write;

use crate::error::Result;
use crate::model::ReleaseRecord;

use super::{format_timestamp, RenderOptions, Renderer};

/// Maximum number of notes lines shown in a preview.
const PREVIEW_LINES: usize = 5;

/// Maximum preview length in characters.
const PREVIEW_CHARS: usize = 200;

/// Console renderer producing a numbered release summary.
#[derive(Debug, Clone, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Create a new console renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for ConsoleRenderer {
    fn render<W: Write>(
        &self,
        records: &[ReleaseRecord],
        writer: &mut W,
        _options: &RenderOptions,
    ) -> Result<()> {
        if records.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "No release notifications found")?;
            return Ok(());
        }

        let banner = "=".repeat(80);
        writeln!(writer)?;
        writeln!(writer, "{banner}")?;
        writeln!(writer, "GitHub releases (total: {})", records.len())?;
        writeln!(writer, "{banner}")?;
        writeln!(writer)?;

        for (index, record) in records.iter().enumerate() {
            writeln!(writer, "{}. {}", index + 1, record.repository)?;
            writeln!(writer, "   Version: {}", record.version)?;
            writeln!(
                writer,
                "   Released: {}",
                format_timestamp(&record.released_at)
            )?;
            if let Some(url) = &record.url {
                writeln!(writer, "   URL: {url}")?;
            }

            if let Some(notes) = record.notes.text() {
                let trimmed = notes.trim();
                if !trimmed.is_empty() {
                    writeln!(writer)?;
                    writeln!(writer, "   Release notes:")?;
                    for line in notes_preview(trimmed).split('\n') {
                        writeln!(writer, "     {line}")?;
                    }
                }
            }

            writeln!(writer)?;
        }

        Ok(())
    }
}

/// Cap a notes body at [`PREVIEW_LINES`] lines or [`PREVIEW_CHARS`]
/// characters, whichever triggers first.
///
/// Character truncation appends an inline `...`; line truncation appends a
/// `...` continuation line.
fn notes_preview(notes: &str) -> String {
    let lines: Vec<&str> = notes.split('\n').collect();
    let preview = lines
        .iter()
        .take(PREVIEW_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    if preview.chars().count() > PREVIEW_CHARS {
        let cut: String = preview.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else if lines.len() > PREVIEW_LINES {
        format!("{preview}\n...")
    } else {
        preview
    }
}
