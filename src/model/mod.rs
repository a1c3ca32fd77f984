//! Core data structures.
//!
//! Two families of types live here:
//! - [`message`]: read-only Slack wire shapes (messages, attachments, blocks)
//! - [`release`]: the structured release records this tool produces

pub mod message;
pub mod release;

pub use message::{Attachment, Block, BlockText, Message};
pub use release::{sort_releases, ReleaseNotes, ReleaseRecord, UNKNOWN};
