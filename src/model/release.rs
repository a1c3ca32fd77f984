//! Structured release records extracted from notification messages.

use chrono::{DateTime, Local};

/// Sentinel for fields that could not be extracted from any source.
pub const UNKNOWN: &str = "Unknown";

/// A single GitHub release extracted from a notification message.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRecord {
    /// Repository in `owner/name` form, or [`UNKNOWN`].
    pub repository: String,

    /// Version string (e.g. `v2.3.1`), or [`UNKNOWN`].
    pub version: String,

    /// When the notification was posted, from the message timestamp.
    pub released_at: DateTime<Local>,

    /// URL of the release tag page, if one was found.
    pub url: Option<String>,

    /// Release notes enrichment state.
    pub notes: ReleaseNotes,
}

/// Release notes attached to a record.
///
/// The three states are distinct on purpose: renderers must be able to tell
/// "enrichment was never requested" apart from "requested but nothing came
/// back". The CSV renderer, for example, only emits a `notes` column when
/// enrichment was requested for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReleaseNotes {
    /// Enrichment was not requested for this run.
    #[default]
    NotRequested,

    /// Enrichment was requested but no notes could be fetched.
    Unavailable,

    /// Non-empty release notes body, verbatim from the release API.
    Found(String),
}

impl ReleaseNotes {
    /// The notes body, if any was found.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Found(body) => Some(body),
            Self::NotRequested | Self::Unavailable => None,
        }
    }
}

/// Sort records by release timestamp, newest first.
///
/// The sort is stable: records with identical timestamps keep the relative
/// order the provider returned them in.
pub fn sort_releases(releases: &mut [ReleaseRecord]) {
    releases.sort_by(|a, b| b.released_at.cmp(&a.released_at));
}
