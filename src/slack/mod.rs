//! Slack Web API client.
//!
//! Covers the two calls a scan needs: resolving a channel name to an ID via
//! `conversations.list` and pulling history via `conversations.history`.
//! Both are cursor-paginated; pages are concatenated in the order the API
//! returns them, with no chronology assumption (the parser sorts later).
//!
//! Calls are synchronous and unretried. Any transport failure or `ok: false`
//! envelope becomes a [`ScanError::SlackApi`] carrying the upstream error
//! code.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::model::Message;

/// Base URL of the Slack Web API.
const SLACK_API_BASE: &str = "https://slack.com/api";

/// Page size for listing and history calls (the API maximum).
const PAGE_LIMIT: &str = "1000";

/// Client for the Slack Web API, scoped to one channel for the lifetime of
/// a scan session.
#[derive(Debug)]
pub struct SlackClient {
    agent: ureq::Agent,
    token: String,
    channel_name: String,
    /// Resolved channel ID, cached after the first lookup.
    channel_id: Option<String>,
}

/// Response envelope for `conversations.list`.
#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
    name: String,
}

/// Response envelope for `conversations.history`.
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: Option<String>,
}

impl ResponseMetadata {
    /// The cursor for the next page, if the API reported one.
    ///
    /// Slack signals "no more pages" with an empty cursor string.
    fn cursor(metadata: Option<&Self>) -> Option<String> {
        metadata
            .and_then(|m| m.next_cursor.as_deref())
            .filter(|cursor| !cursor.is_empty())
            .map(ToString::to_string)
    }
}

impl SlackClient {
    /// Create a client for the given bot credential and channel name.
    #[must_use]
    pub fn new(token: impl Into<String>, channel_name: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            token: token.into(),
            channel_name: channel_name.into(),
            channel_id: None,
        }
    }

    /// The channel name this client is scoped to.
    #[must_use]
    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    /// Resolve the channel name to its ID, caching the result for the
    /// session.
    ///
    /// Lists all channels visible to the credential (public and private,
    /// following cursors until exhausted) and matches on exact name.
    ///
    /// # Errors
    ///
    /// [`ScanError::ChannelNotFound`] if no channel matches;
    /// [`ScanError::SlackApi`] on any API failure.
    pub fn channel_id(&mut self) -> Result<String> {
        if let Some(id) = &self.channel_id {
            return Ok(id.clone());
        }

        let mut cursor: Option<String> = None;
        loop {
            let mut request = self
                .agent
                .get(&format!("{SLACK_API_BASE}/conversations.list"))
                .set("Authorization", &format!("Bearer {}", self.token))
                .query("types", "public_channel,private_channel")
                .query("limit", PAGE_LIMIT);
            if let Some(cursor) = &cursor {
                request = request.query("cursor", cursor);
            }

            let response: ChannelListResponse = call("conversations.list", request)?;
            if !response.ok {
                return Err(ScanError::slack_api(
                    "conversations.list",
                    response.error.unwrap_or_else(|| "unknown_error".to_string()),
                ));
            }

            if let Some(channel) = response
                .channels
                .into_iter()
                .find(|channel| channel.name == self.channel_name)
            {
                debug!(channel = %self.channel_name, id = %channel.id, "resolved channel");
                self.channel_id = Some(channel.id.clone());
                return Ok(channel.id);
            }

            cursor = ResponseMetadata::cursor(response.response_metadata.as_ref());
            if cursor.is_none() {
                return Err(ScanError::ChannelNotFound {
                    channel: self.channel_name.clone(),
                });
            }
        }
    }

    /// Retrieve all messages newer than `days` days ago.
    ///
    /// Follows `next_cursor` pagination while the API reports more pages and
    /// concatenates pages in provider-returned order.
    ///
    /// # Errors
    ///
    /// [`ScanError::ChannelNotFound`] or [`ScanError::SlackApi`].
    pub fn fetch_messages(&mut self, days: i64) -> Result<Vec<Message>> {
        let channel_id = self.channel_id()?;
        let cutoff = chrono::Local::now() - chrono::Duration::days(days);
        let oldest = cutoff.timestamp().to_string();

        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut request = self
                .agent
                .get(&format!("{SLACK_API_BASE}/conversations.history"))
                .set("Authorization", &format!("Bearer {}", self.token))
                .query("channel", &channel_id)
                .query("oldest", &oldest)
                .query("limit", PAGE_LIMIT);
            if let Some(cursor) = &cursor {
                request = request.query("cursor", cursor);
            }

            let response: HistoryResponse = call("conversations.history", request)?;
            if !response.ok {
                return Err(ScanError::slack_api(
                    "conversations.history",
                    response.error.unwrap_or_else(|| "unknown_error".to_string()),
                ));
            }

            messages.extend(response.messages);

            cursor = ResponseMetadata::cursor(response.response_metadata.as_ref());
            if !response.has_more || cursor.is_none() {
                break;
            }
        }

        debug!(count = messages.len(), days, "fetched channel history");
        Ok(messages)
    }
}

/// Execute a request and decode its JSON body.
fn call<T: serde::de::DeserializeOwned>(method: &str, request: ureq::Request) -> Result<T> {
    let response = request
        .call()
        .map_err(|err| ScanError::slack_api(method, err.to_string()))?;
    serde_json::from_reader(response.into_reader()).map_err(|err| ScanError::Json {
        context: method.to_string(),
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_channel_list_envelope() {
        let response: ChannelListResponse = serde_json::from_str(
            r#"{
                "ok": true,
                "channels": [
                    {"id": "C024BE91L", "name": "notification-development", "is_channel": true}
                ],
                "response_metadata": {"next_cursor": "dGVhbTpDMDYxRkE1UEI="}
            }"#,
        )
        .unwrap();

        assert!(response.ok);
        assert_eq!(response.channels[0].id, "C024BE91L");
        assert_eq!(
            ResponseMetadata::cursor(response.response_metadata.as_ref()).as_deref(),
            Some("dGVhbTpDMDYxRkE1UEI=")
        );
    }

    #[test]
    fn test_error_envelope() {
        let response: HistoryResponse =
            serde_json::from_str(r#"{"ok": false, "error": "channel_not_found"}"#).unwrap();

        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("channel_not_found"));
        assert!(response.messages.is_empty());
    }

    #[test]
    fn test_empty_cursor_means_no_more_pages() {
        let response: HistoryResponse = serde_json::from_str(
            r#"{"ok": true, "messages": [], "has_more": false,
                "response_metadata": {"next_cursor": ""}}"#,
        )
        .unwrap();

        assert_eq!(
            ResponseMetadata::cursor(response.response_metadata.as_ref()),
            None
        );
    }

    #[test]
    fn test_history_envelope_carries_messages() {
        let response: HistoryResponse = serde_json::from_str(
            r#"{
                "ok": true,
                "messages": [
                    {"ts": "1743224400.000100", "text": "hello",
                     "attachments": [{"fallback": "New release: v1.0.0"}]}
                ],
                "has_more": true,
                "response_metadata": {"next_cursor": "bmV4dA=="}
            }"#,
        )
        .unwrap();

        assert!(response.has_more);
        assert_eq!(response.messages.len(), 1);
        assert_eq!(
            response.messages[0].attachments[0].fallback.as_deref(),
            Some("New release: v1.0.0")
        );
    }
}
