//! CLI for the AFM remote application file mirror.

mod download;
mod usage;

use anyhow::Result;
use clap::Parser;

use download::run_download;
pub use usage::{check_invocation, UsageError};

/// Mirror files from a remote application instance to the local filesystem.
#[derive(Debug, Parser)]
#[command(name = "afm", version)]
#[command(about = "Mirror a remote app's files to the local filesystem", long_about = None)]
pub struct Cli {
    /// Name of the remote application.
    pub app_name: String,

    /// Server paths or glob patterns to download (empty downloads the whole app).
    pub paths: Vec<String>,

    /// Write over existing local destinations.
    #[arg(long)]
    pub overwrite: bool,

    /// Treat each path as a single file instead of a directory.
    #[arg(long)]
    pub file: bool,

    /// Print each file as it is downloaded.
    #[arg(long)]
    pub verbose: bool,

    /// Index of the running app instance to target.
    #[arg(short = 'i', long = "instance", alias = "i", default_value_t = 0)]
    pub instance: u32,

    /// Glob or literal server path to skip, with its subtree.
    #[arg(long)]
    pub omit: Option<String>,

    /// Expand a glob to every match instead of only the first.
    #[arg(long)]
    pub all_matches: bool,
}

/// Entry point: usage pre-checks run before clap ever sees the argv, so an
/// app name mistaken for a flag gets its own error instead of a flag-parse
/// one.
pub async fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    check_invocation(&argv)?;

    let cli = Cli::parse();
    run_download(cli).await
}

#[cfg(test)]
mod tests;
