//! Report rendering for release records.
//!
//! Three independent renderers consume the same record list:
//! - Console: numbered human-readable summary with notes previews
//! - CSV: spreadsheet-compatible tabular data
//! - Markdown: digest grouped by calendar date
//!
//! All renderers stream to any `Write` and share [`RenderOptions`]; file
//! output goes through an atomic write.

mod csv;
mod markdown;
mod text;

pub use csv::CsvRenderer;
pub use markdown::MarkdownRenderer;
pub use text::ConsoleRenderer;

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::model::ReleaseRecord;
use crate::util::atomic_write;

/// Common rendering options shared across formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Whether release-notes enrichment was requested for the run.
    ///
    /// Controls the presence of the `notes` CSV column and notes blocks in
    /// the other formats, independent of whether any notes were found.
    pub include_notes: bool,
}

impl RenderOptions {
    /// Builder: mark enrichment as requested.
    #[must_use]
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }
}

/// Trait for report renderers.
pub trait Renderer {
    /// Render records to the writer.
    fn render<W: Write>(
        &self,
        records: &[ReleaseRecord],
        writer: &mut W,
        options: &RenderOptions,
    ) -> Result<()>;
}

/// Render records to a string.
pub fn render_to_string<R: Renderer>(
    renderer: &R,
    records: &[ReleaseRecord],
    options: &RenderOptions,
) -> Result<String> {
    let mut buffer = Vec::new();
    renderer.render(records, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Render records to a file, atomically.
pub fn render_to_file<R: Renderer>(
    renderer: &R,
    records: &[ReleaseRecord],
    path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<()> {
    let mut buffer = Vec::new();
    renderer.render(records, &mut buffer, options)?;
    atomic_write(path, &buffer)
}

/// Format a timestamp for display and CSV output.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a calendar day without zero padding (`2025.3.29`).
#[must_use]
pub fn format_day(ts: &DateTime<Local>) -> String {
    ts.format("%Y.%-m.%-d").to_string()
}
