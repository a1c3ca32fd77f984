//! Markdown digest renderer.
//!
//! Produces a flat bullet outline grouped by calendar date, newest date
//! first. Records arrive pre-sorted by timestamp descending, so grouping in
//! first-encounter order yields descending date groups without re-sorting
//! date strings (which would order `2025.10.1` before `2025.3.29`).

use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::ReleaseRecord;

use super::{format_day, RenderOptions, Renderer};

/// Fixed sub-header emitted under each date group.
const GROUP_HEADER: &str = "Repository release updates";

/// Markdown renderer producing a date-grouped digest.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for MarkdownRenderer {
    fn render<W: Write>(
        &self,
        records: &[ReleaseRecord],
        writer: &mut W,
        _options: &RenderOptions,
    ) -> Result<()> {
        let mut groups: IndexMap<String, Vec<&ReleaseRecord>> = IndexMap::new();
        for record in records {
            groups
                .entry(format_day(&record.released_at))
                .or_default()
                .push(record);
        }

        for (day, group) in &groups {
            writeln!(writer, "- {day}")?;
            writeln!(writer, "  - {GROUP_HEADER}")?;

            for record in group {
                let date = format_day(&record.released_at);
                match &record.url {
                    Some(url) => writeln!(
                        writer,
                        "    - [{} {}]({url}) ({date})",
                        record.repository, record.version
                    )?,
                    None => writeln!(
                        writer,
                        "    - {} {} ({date})",
                        record.repository, record.version
                    )?,
                }

                if let Some(notes) = record.notes.text() {
                    write_notes(writer, notes)?;
                }
            }
        }

        Ok(())
    }
}

/// Emit one sub-bullet per meaningful notes line.
///
/// Heading lines are dropped, existing list items pass through, and
/// everything else is turned into a list item.
fn write_notes<W: Write>(writer: &mut W, notes: &str) -> Result<()> {
    for line in notes.trim().split('\n') {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('-') || line.starts_with('*') {
            writeln!(writer, "      {line}")?;
        } else {
            writeln!(writer, "      - {line}")?;
        }
    }
    Ok(())
}
