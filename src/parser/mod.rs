//! Release notification parsing.
//!
//! The notification-producing integration renders release data
//! inconsistently: sometimes in an attachment's fallback text, sometimes in
//! its title or body, sometimes only in a section block or a decorated title
//! link. No single location is reliable, so each field is resolved by trying
//! an ordered list of sources and taking the first match.
//!
//! # Example
//!
//! ```rust
//! use relscan::model::Message;
//! use relscan::parser::parse_releases;
//!
//! let messages: Vec<Message> = serde_json::from_str(r#"[{
//!     "ts": "1743224400.000100",
//!     "attachments": [{"fallback": "New release: v2.3.1 in acme/widget"}]
//! }]"#).unwrap();
//!
//! let releases = parse_releases(&messages);
//! assert_eq!(releases[0].repository, "acme/widget");
//! assert_eq!(releases[0].version, "v2.3.1");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::{sort_releases, Message, ReleaseNotes, ReleaseRecord, UNKNOWN};

/// The literal an attachment fallback must contain for a message to count
/// as a release notification.
const RELEASE_MARKER: &str = "New release";

/// `in owner/name` / `for owner/name` phrases.
static REPO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:in|for)\s+([A-Za-z0-9_-]+/[A-Za-z0-9_.-]+)").expect("valid repository regex")
});

/// Semantic-version-like tokens, optionally prefixed with `v` and suffixed
/// with a separator plus an alphanumeric tag (`1.2.3`, `v1.2.3-rc1`).
static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(v?\d+\.\d+\.\d+(?:[.-][A-Za-z0-9]+)?)\b").expect("valid version regex")
});

/// Release tag URLs, up to the tag token (stops before `|` decoration).
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://github\.com/[A-Za-z0-9_-]+/[A-Za-z0-9_.-]+/releases/tag/[A-Za-z0-9_.-]+")
        .expect("valid release URL regex")
});

/// `owner/name` inside a github.com URL, for the repository fallback.
static URL_REPO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"github\.com/([A-Za-z0-9_-]+/[A-Za-z0-9_.-]+)").expect("valid URL repository regex")
});

/// Extract release records from a batch of messages.
///
/// Messages without a qualifying attachment are dropped. The result is
/// sorted by release timestamp descending; ties keep provider order.
#[must_use]
pub fn parse_releases(messages: &[Message]) -> Vec<ReleaseRecord> {
    let mut releases: Vec<ReleaseRecord> = messages
        .iter()
        .filter(|message| is_release_notification(message))
        .map(extract_record)
        .collect();

    debug!(
        total = messages.len(),
        releases = releases.len(),
        "parsed release notifications"
    );

    sort_releases(&mut releases);
    releases
}

/// A message is a release notification iff some attachment's fallback
/// contains the release marker. Blocks never qualify a message on their own.
fn is_release_notification(message: &Message) -> bool {
    message.attachments.iter().any(|attachment| {
        attachment
            .fallback
            .as_deref()
            .is_some_and(|fallback| fallback.contains(RELEASE_MARKER))
    })
}

/// Extract the three fields from a qualifying message.
///
/// Each field is resolved independently: the per-field `Option` short-
/// circuits further sources once a match is found, without affecting the
/// other fields.
fn extract_record(message: &Message) -> ReleaseRecord {
    let mut repository: Option<String> = None;
    let mut version: Option<String> = None;
    let mut url: Option<String> = None;

    for attachment in &message.attachments {
        let haystack = format!(
            "{} {} {}",
            attachment.fallback.as_deref().unwrap_or(""),
            attachment.title.as_deref().unwrap_or(""),
            attachment.text.as_deref().unwrap_or(""),
        );

        if repository.is_none() {
            repository = capture_group(&REPO_RE, &haystack);
        }
        if version.is_none() {
            version = capture_group(&VERSION_RE, &haystack);
        }
        if url.is_none() {
            url = find_match(&URL_RE, &haystack);
        }

        // Title links sometimes carry the only copy of the URL, wrapped in
        // `|label` or `>suffix` decoration that must be stripped first.
        if url.is_none() {
            if let Some(link) = attachment.title_link.as_deref() {
                if link.contains("github.com") && link.contains("/releases/") {
                    let clean = link.split(['|', '>']).next().unwrap_or("").trim();
                    url = find_match(&URL_RE, clean);
                }
            }
        }
    }

    for block in &message.blocks {
        let Some(text) = block.section_text() else {
            continue;
        };
        if repository.is_none() {
            repository = capture_group(&REPO_RE, text);
        }
        if version.is_none() {
            version = capture_group(&VERSION_RE, text);
        }
        if url.is_none() {
            url = find_match(&URL_RE, text);
        }
    }

    // Last resort for the repository: pull owner/name out of the URL path.
    if repository.is_none() {
        if let Some(found) = url.as_deref() {
            repository = capture_group(&URL_REPO_RE, found);
        }
    }

    ReleaseRecord {
        repository: repository.unwrap_or_else(|| UNKNOWN.to_string()),
        version: version.unwrap_or_else(|| UNKNOWN.to_string()),
        released_at: message.timestamp(),
        url,
        notes: ReleaseNotes::NotRequested,
    }
}

/// First capture group of the first match, if any.
fn capture_group(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().to_string())
}

/// Whole text of the first match, if any.
fn find_match(re: &Regex, haystack: &str) -> Option<String> {
    re.find(haystack).map(|found| found.as_str().to_string())
}
