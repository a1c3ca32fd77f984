//! Error types for relscan.
//!
//! This module provides the error taxonomy for a scan run following the
//! thiserror pattern. Fatal errors (channel resolution, Slack API failures,
//! configuration) propagate to `main` and terminate the run; release-notes
//! failures are deliberately not represented here because they degrade to
//! absent values instead of aborting (see [`crate::github`]).

use thiserror::Error;

/// Primary error type for relscan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// No channel with the configured name is visible to the credential.
    #[error("Channel '{channel}' not found")]
    ChannelNotFound {
        /// The channel name that could not be resolved.
        channel: String,
    },

    /// A Slack Web API call failed, either at the transport level or with
    /// an `ok: false` envelope.
    #[error("Slack API call '{method}' failed: {code}")]
    SlackApi {
        /// The Slack Web API method that failed (e.g. `conversations.history`).
        method: String,
        /// The upstream error code or transport error description.
        code: String,
    },

    /// Configuration error (missing or unusable settings).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    Io {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A response body could not be decoded.
    #[error("Failed to decode response from '{context}'")]
    Json {
        /// The API method whose response was malformed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Create a new Slack API error.
    #[must_use]
    pub fn slack_api(method: impl Into<String>, code: impl Into<String>) -> Self {
        Self::SlackApi {
            method: method.into(),
            code: code.into(),
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for relscan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}
