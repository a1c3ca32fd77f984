//! Integration tests for the parse-and-render pipeline.
//!
//! These tests drive the full path from Slack-shaped JSON payloads through
//! the parser to each renderer, using fixture data modeled on real GitHub
//! integration notifications.

use std::path::PathBuf;

use relscan::export::{
    render_to_string, ConsoleRenderer, CsvRenderer, MarkdownRenderer, RenderOptions,
};
use relscan::model::{Message, ReleaseNotes, ReleaseRecord, UNKNOWN};
use relscan::parser::parse_releases;

/// Get the path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse a fixture file into messages.
fn load_fixture(name: &str) -> Vec<Message> {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", name, e))
}

fn parse_fixture_releases() -> Vec<ReleaseRecord> {
    parse_releases(&load_fixture("release_notifications.json"))
}

mod parsing {
    use super::*;

    #[test]
    fn test_fixture_yields_three_releases() {
        let releases = parse_fixture_releases();

        // Five messages: one plain chatter message with a release phrase in
        // a block only, one non-release deployment notice, three genuine
        // notifications.
        assert_eq!(releases.len(), 3, "Expected 3 releases from fixture");
    }

    #[test]
    fn test_releases_sorted_newest_first() {
        let releases = parse_fixture_releases();

        assert_eq!(releases[0].repository, "acme/widget");
        assert_eq!(releases[1].repository, "contoso/service-api");
        assert_eq!(releases[2].repository, UNKNOWN);
        assert!(releases[0].released_at > releases[1].released_at);
        assert!(releases[1].released_at > releases[2].released_at);
    }

    #[test]
    fn test_repository_from_url_when_no_phrase_matches() {
        // First fixture message has no "in/for owner/name" phrase anywhere;
        // the repository must come from the cleaned title-link URL.
        let releases = parse_fixture_releases();
        let release = &releases[0];

        assert_eq!(release.repository, "acme/widget");
        assert_eq!(release.version, "v2.3.1");
        assert_eq!(
            release.url.as_deref(),
            Some("https://github.com/acme/widget/releases/tag/v2.3.1")
        );
    }

    #[test]
    fn test_block_text_supplies_url_for_qualified_message() {
        let releases = parse_fixture_releases();
        let release = &releases[1];

        assert_eq!(release.version, "1.0.0-rc2");
        assert_eq!(
            release.url.as_deref(),
            Some("https://github.com/contoso/service-api/releases/tag/1.0.0-rc2")
        );
    }

    #[test]
    fn test_unparseable_notification_defaults_to_unknown() {
        let releases = parse_fixture_releases();
        let release = &releases[2];

        assert_eq!(release.repository, UNKNOWN);
        assert_eq!(release.version, UNKNOWN);
        assert_eq!(release.url, None);
    }

    #[test]
    fn test_notes_absent_when_enrichment_not_requested() {
        let releases = parse_fixture_releases();
        assert!(releases
            .iter()
            .all(|release| release.notes == ReleaseNotes::NotRequested));
    }
}

mod rendering {
    use super::*;

    #[test]
    fn test_console_report_lists_all_releases() {
        let releases = parse_fixture_releases();
        let output = render_to_string(
            &ConsoleRenderer::new(),
            &releases,
            &RenderOptions::default(),
        )
        .unwrap();

        assert!(output.contains("GitHub releases (total: 3)"));
        assert!(output.contains("1. acme/widget"));
        assert!(output.contains("2. contoso/service-api"));
        assert!(output.contains("3. Unknown"));
    }

    #[test]
    fn test_csv_omits_notes_column_without_enrichment() {
        let releases = parse_fixture_releases();
        let output = render_to_string(
            &CsvRenderer::new(),
            &releases,
            &RenderOptions::default(),
        )
        .unwrap();

        let header = output.lines().next().unwrap();
        assert_eq!(header, "repository,version,release_date,url");
        assert!(!output.contains("notes"));
        // One header plus one row per release, each newline-terminated.
        assert_eq!(output.lines().count(), 4);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_csv_url_column_empty_for_unknown_release() {
        let releases = parse_fixture_releases();
        let output = render_to_string(
            &CsvRenderer::new(),
            &releases,
            &RenderOptions::default(),
        )
        .unwrap();

        let unknown_row = output
            .lines()
            .find(|line| line.starts_with(UNKNOWN))
            .expect("row for unknown release");
        assert!(unknown_row.ends_with(','), "URL column should be empty");
    }

    #[test]
    fn test_markdown_digest_groups_and_links() {
        let mut releases = parse_fixture_releases();
        releases[1].notes = ReleaseNotes::Found("# Changes\n- faster\nsmaller".to_string());

        let output = render_to_string(
            &MarkdownRenderer::new(),
            &releases,
            &RenderOptions::default().with_notes(true),
        )
        .unwrap();

        // Linked bullet for the release with a URL.
        assert!(output.contains(
            "    - [acme/widget v2.3.1](https://github.com/acme/widget/releases/tag/v2.3.1)"
        ));
        // Plain bullet for the release without one.
        assert!(output.contains("    - Unknown Unknown ("));
        assert!(!output.contains("[Unknown"));
        // Notes: heading dropped, list item kept, plain line bulleted.
        assert!(!output.contains("Changes"));
        assert!(output.contains("      - faster"));
        assert!(output.contains("      - smaller"));
    }

    #[test]
    fn test_markdown_group_headers_match_release_days() {
        let releases = parse_fixture_releases();
        let output = render_to_string(
            &MarkdownRenderer::new(),
            &releases,
            &RenderOptions::default(),
        )
        .unwrap();

        // Each release day appears exactly once as a group header, in the
        // same order as the sorted records.
        let mut last_position = 0;
        for release in &releases {
            let day = release.released_at.format("%Y.%-m.%-d").to_string();
            let header = format!("- {day}\n");
            let position = output.find(&header).expect("group header present");
            assert!(position >= last_position);
            last_position = position;
        }
    }
}

mod enrichment_state {
    use super::*;

    #[test]
    fn test_notes_states_flow_through_csv() {
        let mut releases = parse_fixture_releases();
        releases[0].notes = ReleaseNotes::Found("all new".to_string());
        releases[1].notes = ReleaseNotes::Unavailable;
        releases[2].notes = ReleaseNotes::Unavailable;

        let output = render_to_string(
            &CsvRenderer::new(),
            &releases,
            &RenderOptions::default().with_notes(true),
        )
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "repository,version,release_date,url,notes");
        assert!(lines[1].ends_with(",all new"));
        assert!(lines[2].ends_with(','), "unavailable notes render empty");
    }
}
