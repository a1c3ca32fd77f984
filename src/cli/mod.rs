//! Command-line interface.
//!
//! The tool takes no positional arguments: every option is bound to an
//! environment variable, and the environment is the primary interface (the
//! flags exist for discoverability and `--help`). A run scans the configured
//! channel, prints a console summary, and optionally writes CSV and Markdown
//! reports.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::{parse_bool_flag, Settings};
use crate::error::Result;
use crate::export::{
    render_to_file, ConsoleRenderer, CsvRenderer, MarkdownRenderer, RenderOptions, Renderer,
};
use crate::github::ReleaseNotesClient;
use crate::model::{Message, ReleaseNotes, ReleaseRecord};
use crate::parser::parse_releases;
use crate::slack::SlackClient;

/// Scan a Slack channel for GitHub release notifications.
#[derive(Debug, Parser)]
#[command(name = "relscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Slack bot token (xoxb-...).
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Channel name to scan.
    #[arg(long, env = "SLACK_CHANNEL", default_value = "notification-development")]
    pub channel: String,

    /// Scan window in days.
    #[arg(long, env = "SCAN_DAYS", default_value_t = 7)]
    pub days: i64,

    /// Dump every fetched message's raw structure instead of scanning.
    #[arg(
        long,
        env = "DEBUG",
        value_parser = parse_bool_flag,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value = "false"
    )]
    pub debug: bool,

    /// Fetch release notes from the GitHub API for each release.
    #[arg(
        long,
        env = "FETCH_NOTES",
        value_parser = parse_bool_flag,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value = "false"
    )]
    pub fetch_notes: bool,

    /// Write a CSV report to this path.
    #[arg(long, env = "OUTPUT_CSV")]
    pub output_csv: Option<PathBuf>,

    /// Write a Markdown digest to this path.
    #[arg(long, env = "OUTPUT_MD")]
    pub output_md: Option<PathBuf>,

    /// GitHub token for release-notes calls (raises rate limits).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "RELSCAN_LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

impl LogLevel {
    /// Convert to a tracing filter directive.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Initialize tracing output to stderr, keeping stdout for reports.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::new(cli.log_level.to_filter_string());
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = Settings::from_cli(cli)?;
    let mut slack = SlackClient::new(settings.slack_token.clone(), settings.channel.clone());

    println!(
        "Fetching the last {} days of messages from '{}'...",
        settings.scan_days, settings.channel
    );
    let messages = slack.fetch_messages(settings.scan_days)?;
    println!("Fetched {} messages", messages.len());

    if settings.debug {
        dump_messages(&messages);
        return Ok(());
    }

    println!("Parsing release notifications...");
    let mut releases = parse_releases(&messages);
    println!("Found {} release notifications", releases.len());

    if settings.fetch_notes && !releases.is_empty() {
        enrich_releases(&mut releases, &settings);
    }

    let options = RenderOptions::default().with_notes(settings.fetch_notes);

    let console = ConsoleRenderer::new();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    console.render(&releases, &mut handle, &options)?;
    handle.flush()?;

    if let Some(path) = &settings.csv_path {
        render_to_file(&CsvRenderer::new(), &releases, path, &options)?;
        println!("Wrote CSV report: {}", path.display());
    }

    if let Some(path) = &settings.markdown_path {
        render_to_file(&MarkdownRenderer::new(), &releases, path, &options)?;
        println!("Wrote Markdown digest: {}", path.display());
    }

    Ok(())
}

/// Fetch release notes for every record that has a URL, in record order.
///
/// Failures only affect the record at hand; the loop never aborts.
fn enrich_releases(releases: &mut [ReleaseRecord], settings: &Settings) {
    println!();
    println!("Fetching release notes...");

    let client = ReleaseNotesClient::new(settings.github_token.clone());
    let total = releases.len();

    for (index, release) in releases.iter_mut().enumerate() {
        match release.url.clone() {
            Some(url) => {
                println!(
                    "  [{}/{}] {} {} - {}",
                    index + 1,
                    total,
                    release.repository,
                    release.version,
                    url
                );
                release.notes = match client.fetch_notes(&url) {
                    Some(body) => {
                        println!("  fetched {} characters", body.chars().count());
                        ReleaseNotes::Found(body)
                    }
                    None => ReleaseNotes::Unavailable,
                };
            }
            None => release.notes = ReleaseNotes::Unavailable,
        }
    }
}

/// Print every message's raw structure for inspecting what the channel's
/// integrations actually send.
fn dump_messages(messages: &[Message]) {
    let banner = "=".repeat(80);
    println!();
    println!("{banner}");
    println!("Debug mode: dumping message structures");
    println!("{banner}");
    println!();

    for (index, message) in messages.iter().enumerate() {
        println!("--- Message {} ---", index + 1);
        println!(
            "Date: {}",
            message.timestamp().format("%Y-%m-%d %H:%M:%S")
        );
        println!("Subtype: {}", message.subtype.as_deref().unwrap_or("normal"));
        println!("Text: '{}'", message.text.as_deref().unwrap_or(""));

        if !message.attachments.is_empty() {
            println!();
            println!("Attachments: {}", message.attachments.len());
            for (j, attachment) in message.attachments.iter().enumerate() {
                println!("  Attachment {}:", j + 1);
                println!(
                    "    Service Name: {}",
                    attachment.service_name.as_deref().unwrap_or("")
                );
                println!("    Title: {}", attachment.title.as_deref().unwrap_or(""));
                println!(
                    "    Title Link: {}",
                    attachment.title_link.as_deref().unwrap_or("")
                );
                println!("    Text: {}", attachment.text.as_deref().unwrap_or(""));
                println!(
                    "    Fallback: {}",
                    attachment.fallback.as_deref().unwrap_or("")
                );
                println!("    Footer: {}", attachment.footer.as_deref().unwrap_or(""));
            }
        }

        if !message.blocks.is_empty() {
            println!();
            println!("Blocks: {}", message.blocks.len());
            for (j, block) in message.blocks.iter().enumerate() {
                println!("  Block {}:", j + 1);
                println!("    Type: {}", block.block_type);
                if let Some(text) = &block.text {
                    println!("    Text: {}", text.text);
                }
                if let Some(elements) = &block.elements {
                    println!("    Elements: {elements}");
                }
            }
        }

        println!();
        println!("{}", "-".repeat(80));
        println!();
    }
}
