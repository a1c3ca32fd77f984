//! relscan: scan a Slack channel for GitHub release notifications.
//!
//! This crate fetches a channel's recent history, identifies automated
//! "New release" notifications, extracts structured release metadata
//! (repository, version, timestamp, URL) with layered pattern fallbacks,
//! optionally enriches each release with notes from the GitHub API, and
//! renders the result as a console summary, CSV, or a date-grouped Markdown
//! digest.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use relscan::export::{render_to_string, ConsoleRenderer, RenderOptions};
//! use relscan::parser::parse_releases;
//! use relscan::slack::SlackClient;
//!
//! fn main() -> relscan::Result<()> {
//!     let mut slack = SlackClient::new("xoxb-token", "notification-development");
//!     let messages = slack.fetch_messages(7)?;
//!     let releases = parse_releases(&messages);
//!
//!     let report = render_to_string(
//!         &ConsoleRenderer::new(),
//!         &releases,
//!         &RenderOptions::default(),
//!     )?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Data flows one way, with no state across runs:
//!
//! - [`slack`]: channel resolution and paginated history retrieval
//! - [`parser`]: release notification classification and field extraction
//! - [`github`]: best-effort release notes enrichment
//! - [`export`]: console, CSV and Markdown renderers
//! - [`cli`] / [`config`]: environment-driven wiring
//! - [`model`]: message wire types and release records
//! - [`error`]: error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod model;
pub mod parser;
pub mod slack;
pub mod util;

// Re-export commonly used types at the crate root
pub use error::{Result, ScanError};
pub use model::{Message, ReleaseNotes, ReleaseRecord};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {

    pub use crate::error::{Result, ScanError};
    pub use crate::export::{
        ConsoleRenderer, CsvRenderer, MarkdownRenderer, RenderOptions, Renderer,
    };
    pub use crate::model::{Message, ReleaseNotes, ReleaseRecord};
    pub use crate::parser::parse_releases;
}
