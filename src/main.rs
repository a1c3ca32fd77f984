//! relscan: scan a Slack channel for GitHub release notifications.
//!
//! Thin binary wrapper: all behavior lives in the library's [`relscan::cli`]
//! module. Errors print as a single line on standard output (the report
//! channel) and map to exit code 1.

use std::process::ExitCode;

use relscan::cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e}");

            // Print cause chain in debug mode
            if std::env::var("RUST_BACKTRACE").is_ok() {
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("Caused by: {source}");
                }
            }

            ExitCode::FAILURE
        }
    }
}
