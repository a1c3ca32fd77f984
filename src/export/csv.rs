//! CSV renderer for release records.

use std::io::Write;

use crate::error::Result;
use crate::model::ReleaseRecord;

use super::{format_timestamp, RenderOptions, Renderer};

/// CSV renderer producing one row per release.
///
/// The `notes` column is present iff enrichment was requested for the run,
/// regardless of whether any notes were found.
#[derive(Debug, Clone)]
pub struct CsvRenderer {
    /// Field delimiter.
    delimiter: char,
    /// Quote character.
    quote_char: char,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRenderer {
    /// Create a new CSV renderer with standard comma/double-quote framing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
        }
    }

    /// Escape a field value for CSV.
    fn escape_field(&self, value: &str) -> String {
        let needs_quoting = value.contains(self.delimiter)
            || value.contains(self.quote_char)
            || value.contains('\n')
            || value.contains('\r');

        if needs_quoting {
            let escaped = value.replace(
                self.quote_char,
                &format!("{}{}", self.quote_char, self.quote_char),
            );
            format!("{}{}{}", self.quote_char, escaped, self.quote_char)
        } else {
            value.to_string()
        }
    }

    /// Write a CSV row with a trailing newline.
    fn write_row<W: Write>(&self, writer: &mut W, fields: &[&str]) -> Result<()> {
        let line: Vec<String> = fields.iter().map(|f| self.escape_field(f)).collect();
        writeln!(writer, "{}", line.join(&self.delimiter.to_string()))?;
        Ok(())
    }
}

impl Renderer for CsvRenderer {
    fn render<W: Write>(
        &self,
        records: &[ReleaseRecord],
        writer: &mut W,
        options: &RenderOptions,
    ) -> Result<()> {
        if options.include_notes {
            self.write_row(
                writer,
                &["repository", "version", "release_date", "url", "notes"],
            )?;
        } else {
            self.write_row(writer, &["repository", "version", "release_date", "url"])?;
        }

        for record in records {
            let release_date = format_timestamp(&record.released_at);
            let url = record.url.as_deref().unwrap_or("");

            if options.include_notes {
                let notes = record.notes.text().unwrap_or("");
                self.write_row(
                    writer,
                    &[&record.repository, &record.version, &release_date, url, notes],
                )?;
            } else {
                self.write_row(
                    writer,
                    &[&record.repository, &record.version, &release_date, url],
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::render_to_string;
    use crate::model::ReleaseNotes;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn record(url: Option<&str>, notes: ReleaseNotes) -> ReleaseRecord {
        ReleaseRecord {
            repository: "acme/widget".to_string(),
            version: "v2.3.1".to_string(),
            released_at: Local.with_ymd_and_hms(2025, 3, 29, 14, 1, 2).unwrap(),
            url: url.map(ToString::to_string),
            notes,
        }
    }

    #[test]
    fn test_header_without_notes_column() {
        let output = render_to_string(
            &CsvRenderer::new(),
            &[record(None, ReleaseNotes::NotRequested)],
            &RenderOptions::default(),
        )
        .unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("repository,version,release_date,url"));
        assert_eq!(
            lines.next(),
            Some("acme/widget,v2.3.1,2025-03-29 14:01:02,")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_header_with_notes_column() {
        let output = render_to_string(
            &CsvRenderer::new(),
            &[record(
                Some("https://github.com/acme/widget/releases/tag/v2.3.1"),
                ReleaseNotes::Found("fixed things".to_string()),
            )],
            &RenderOptions::default().with_notes(true),
        )
        .unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("repository,version,release_date,url,notes")
        );
        assert_eq!(
            lines.next(),
            Some("acme/widget,v2.3.1,2025-03-29 14:01:02,https://github.com/acme/widget/releases/tag/v2.3.1,fixed things")
        );
    }

    #[test]
    fn test_unavailable_notes_render_as_empty_field() {
        let output = render_to_string(
            &CsvRenderer::new(),
            &[record(None, ReleaseNotes::Unavailable)],
            &RenderOptions::default().with_notes(true),
        )
        .unwrap();

        assert_eq!(
            output.lines().nth(1),
            Some("acme/widget,v2.3.1,2025-03-29 14:01:02,,")
        );
    }

    #[test]
    fn test_notes_with_commas_and_newlines_are_quoted() {
        let output = render_to_string(
            &CsvRenderer::new(),
            &[record(
                None,
                ReleaseNotes::Found("fixed a, b\nand \"c\"".to_string()),
            )],
            &RenderOptions::default().with_notes(true),
        )
        .unwrap();

        assert!(output.contains("\"fixed a, b\nand \"\"c\"\"\""));
    }

    #[test]
    fn test_every_row_has_trailing_newline() {
        let output = render_to_string(
            &CsvRenderer::new(),
            &[record(None, ReleaseNotes::NotRequested)],
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_escape_field() {
        let renderer = CsvRenderer::new();
        assert_eq!(renderer.escape_field("simple"), "simple");
        assert_eq!(renderer.escape_field("with,comma"), "\"with,comma\"");
        assert_eq!(renderer.escape_field("with\"quote"), "\"with\"\"quote\"");
    }
}
