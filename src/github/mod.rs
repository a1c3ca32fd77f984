//! GitHub release notes enrichment.
//!
//! Given a release tag URL (`https://github.com/owner/repo/releases/tag/v1.0.0`),
//! derives the corresponding REST endpoint
//! (`/repos/owner/repo/releases/tags/v1.0.0`) and fetches the release body.
//!
//! Enrichment is strictly best-effort: a malformed URL, timeout, non-200
//! status, undecodable response, or empty body all degrade to `None` with a
//! warning. Nothing in this module can abort a scan.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

/// Base URL of the GitHub REST API.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Wall-clock limit per notes fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The `owner`, `repo` and `tag` segments of a release tag URL.
static RELEASE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"github\.com/([^/]+)/([^/]+)/releases/tag/(.+)").expect("valid release URL regex")
});

/// The subset of the release response the enricher reads.
#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    #[serde(default)]
    body: Option<String>,
}

/// Client for fetching release notes from the GitHub API.
#[derive(Debug)]
pub struct ReleaseNotesClient {
    agent: ureq::Agent,
    token: Option<String>,
}

impl ReleaseNotesClient {
    /// Create a client, optionally authenticated with a GitHub token.
    ///
    /// Unauthenticated calls work but are subject to much lower rate limits.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build(),
            token,
        }
    }

    /// Fetch the release notes body for a release tag URL.
    ///
    /// Returns `None` on any failure; never errors.
    #[must_use]
    pub fn fetch_notes(&self, url: &str) -> Option<String> {
        let Some((owner, repo, tag)) = parse_release_url(url) else {
            warn!(url, "unrecognized release URL shape, skipping notes");
            return None;
        };

        let endpoint = format!("{GITHUB_API_BASE}/repos/{owner}/{repo}/releases/tags/{tag}");
        let mut request = self
            .agent
            .get(&endpoint)
            .set("User-Agent", concat!("relscan/", env!("CARGO_PKG_VERSION")))
            .set("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("token {token}"));
        }

        match request.call() {
            Ok(response) => match response.into_json::<ReleaseResponse>() {
                Ok(release) => match release.body {
                    Some(body) if !body.is_empty() => Some(body),
                    _ => {
                        debug!(%endpoint, "release has no notes body");
                        None
                    }
                },
                Err(err) => {
                    warn!(%endpoint, error = %err, "failed to decode release response");
                    None
                }
            },
            Err(ureq::Error::Status(status, _)) => {
                warn!(%endpoint, status, "GitHub API returned an error status");
                None
            }
            Err(err) => {
                warn!(url, error = %err, "release notes request failed");
                None
            }
        }
    }
}

/// Split a release tag URL into `(owner, repo, tag)`.
///
/// The tag is truncated at any query string or fragment and trimmed; URLs
/// not matching the fixed `/releases/tag/` shape yield `None`.
fn parse_release_url(url: &str) -> Option<(String, String, String)> {
    let captures = RELEASE_URL_RE.captures(url)?;
    let owner = captures.get(1)?.as_str().to_string();
    let repo = captures.get(2)?.as_str().to_string();
    let tag = captures
        .get(3)?
        .as_str()
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    Some((owner, repo, tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_release_url() {
        let parsed =
            parse_release_url("https://github.com/acme/widget/releases/tag/v2.3.1").unwrap();
        assert_eq!(
            parsed,
            (
                "acme".to_string(),
                "widget".to_string(),
                "v2.3.1".to_string()
            )
        );
    }

    #[rstest]
    #[case("https://github.com/acme/widget/releases/tag/v1.0.0?foo=bar", "v1.0.0")]
    #[case("https://github.com/acme/widget/releases/tag/v1.0.0#notes", "v1.0.0")]
    #[case("https://github.com/acme/widget/releases/tag/v1.0.0 ", "v1.0.0")]
    fn test_tag_is_cleaned(#[case] url: &str, #[case] expected_tag: &str) {
        let (_, _, tag) = parse_release_url(url).unwrap();
        assert_eq!(tag, expected_tag);
    }

    #[rstest]
    #[case("https://github.com/acme/widget")]
    #[case("https://github.com/acme/widget/releases")]
    #[case("https://example.com/acme/widget/releases/tag/v1.0.0")]
    fn test_non_release_urls_rejected(#[case] url: &str) {
        assert_eq!(parse_release_url(url), None);
    }

    #[test]
    fn test_release_response_body_optional() {
        let release: ReleaseResponse =
            serde_json::from_str(r#"{"tag_name": "v1.0.0", "draft": false}"#).unwrap();
        assert_eq!(release.body, None);
    }
}
