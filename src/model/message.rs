//! Slack message wire types.
//!
//! These mirror the subset of the `conversations.history` payload the
//! scanner reads. Messages are external, read-only input: every sub-field an
//! integration may or may not populate is optional, and unknown fields are
//! ignored. Release notifications in particular spread their data
//! inconsistently across attachment sub-fields and block text, which is why
//! the parser layers several fallback sources (see [`crate::parser`]).

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A single message from a channel's history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    /// Slack timestamp, a `"seconds.micros"` string unique per channel.
    #[serde(default)]
    pub ts: String,

    /// Message subtype (e.g. `bot_message`), absent for plain messages.
    #[serde(default)]
    pub subtype: Option<String>,

    /// Free-text body.
    #[serde(default)]
    pub text: Option<String>,

    /// Legacy attachments, the primary carrier of release notifications.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Block Kit blocks, a secondary data source.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Message {
    /// Convert the Slack `ts` field into a local datetime.
    ///
    /// Malformed or missing timestamps fall back to the Unix epoch, matching
    /// the tolerance expected of read-only external input.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        let ts: f64 = self.ts.parse().unwrap_or(0.0);
        let secs = ts.trunc() as i64;
        let nanos = (ts.fract() * 1_000_000_000.0).round() as u32;
        Utc.timestamp_opt(secs, nanos)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&Local)
    }
}

/// A message attachment. Any subset of fields may be absent or empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    /// Plain-text summary shown by clients without attachment support.
    #[serde(default)]
    pub fallback: Option<String>,

    /// Attachment title.
    #[serde(default)]
    pub title: Option<String>,

    /// URL the title links to, sometimes carrying `|label` decoration.
    #[serde(default)]
    pub title_link: Option<String>,

    /// Attachment body text.
    #[serde(default)]
    pub text: Option<String>,

    /// Name of the integration that posted the attachment.
    #[serde(default)]
    pub service_name: Option<String>,

    /// Footer text.
    #[serde(default)]
    pub footer: Option<String>,
}

/// A Block Kit block. Only `section` blocks carrying text are relevant to
/// extraction; everything else is kept solely for the debug dump.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    /// Block type (`section`, `context`, `actions`, ...).
    #[serde(rename = "type", default)]
    pub block_type: String,

    /// Text object of a `section` block.
    #[serde(default)]
    pub text: Option<BlockText>,

    /// Raw elements of composite blocks.
    #[serde(default)]
    pub elements: Option<Value>,
}

impl Block {
    /// The text content of a `section` block, if this is one.
    #[must_use]
    pub fn section_text(&self) -> Option<&str> {
        if self.block_type == "section" {
            self.text.as_ref().map(|t| t.text.as_str())
        } else {
            None
        }
    }
}

/// The text object inside a block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockText {
    /// Text format (`mrkdwn` or `plain_text`).
    #[serde(rename = "type", default)]
    pub text_type: String,

    /// The text content.
    #[serde(default)]
    pub text: String,
}
