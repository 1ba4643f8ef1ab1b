//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::domain::models::ProgressConfig;
use crate::infrastructure::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "wpt-progress")]
#[command(about = "Completion polling and interop scoring for web-platform-test CI runs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .wpt-progress/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Build/release channel to track
    #[arg(long, global = true)]
    pub channel: Option<String>,

    /// Starting commit ref for the backward walk
    #[arg(long, global = true)]
    pub commit: Option<String>,

    /// Interop scoring year
    #[arg(long, global = true)]
    pub year: Option<String>,

    /// Task-name filter pattern (repeatable; prefix with ! to exclude)
    #[arg(long = "filter", global = true)]
    pub filters: Vec<String>,

    /// Keep scanning older commits when a task group is incomplete
    #[arg(long, global = true)]
    pub scan: bool,

    /// Fetch reference data remotely instead of from local copies
    #[arg(long, global = true)]
    pub remote: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the newest completed commit and score its run
    Score,
    /// Resolve the newest completed commit and list its task set
    Completed,
    /// Show the description of the configured commit ref
    Commit,
}

impl Cli {
    /// Merge file/env configuration with CLI overrides, then validate.
    pub fn load_config(&self) -> Result<ProgressConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };

        if let Some(channel) = &self.channel {
            config.channel = channel.clone();
        }
        if let Some(commit) = &self.commit {
            config.commit = commit.clone();
        }
        if let Some(year) = &self.year {
            config.year = year.clone();
        }
        if !self.filters.is_empty() {
            config.filters = self.filters.clone();
        }
        if self.scan {
            config.scan = true;
        }
        if self.remote {
            config.remote = true;
        }

        ConfigLoader::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "wpt-progress",
            "--channel",
            "autoland",
            "--commit",
            "abc123",
            "--filter",
            "linux",
            "--filter",
            "!debug",
            "--scan",
            "score",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.channel, "autoland");
        assert_eq!(config.commit, "abc123");
        assert_eq!(config.filters, vec!["linux", "!debug"]);
        assert!(config.scan);
    }
}
