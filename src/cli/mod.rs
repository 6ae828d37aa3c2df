// CLI module - User-facing command-line interface

mod output;

use crate::config::{LocatorConfig, StatFailurePolicy};
use crate::error::Result;
use crate::logs::{select_newest, LogLocator};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// vcclog - Find the Visual C++ build tools installer client log
#[derive(Debug, Parser)]
#[command(name = "vcclog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory to scan instead of the OS temp directory
    #[arg(long, global = true)]
    temp_dir: Option<PathBuf>,

    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// What to do when a log file's metadata cannot be read
    #[arg(long, value_enum, global = true)]
    on_stat_error: Option<StatFailurePolicy>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the path of the newest installer client log
    Locate {
        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },

    /// List every installer client log with its modification time
    List,
}

/// Result of a successful command run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Found => 0,
            Outcome::NotFound => 2,
        }
    }
}

impl Cli {
    /// Execute the parsed command
    pub async fn execute(&self) -> Result<Outcome> {
        let config = self.build_config()?;
        debug!("Effective configuration: {:?}", config);
        let locator = LogLocator::from_config(&config);

        match &self.command {
            Commands::Locate { json } => {
                let found = locator.locate().await?;
                let outcome = if found.is_some() {
                    Outcome::Found
                } else {
                    Outcome::NotFound
                };

                if *json {
                    output::print_json(found.as_deref(), &locator.temp_dir())?;
                } else {
                    match found {
                        Some(ref path) => output::print_located(path),
                        None => output::print_not_found(&locator.temp_dir()),
                    }
                }

                Ok(outcome)
            }

            Commands::List => {
                let candidates = locator.candidates().await?;
                if candidates.is_empty() {
                    output::print_not_found(&locator.temp_dir());
                    return Ok(Outcome::NotFound);
                }

                // A lone candidate wins without a stat, same as locate
                let newest = if candidates.len() == 1 {
                    Some(candidates[0].path.as_path())
                } else {
                    select_newest(candidates.iter().map(|c| (c.path.as_path(), c.modified)))
                };

                output::print_candidates(&candidates, newest);
                Ok(Outcome::Found)
            }
        }
    }

    /// Merge the config file (if any) with command-line flags
    fn build_config(&self) -> Result<LocatorConfig> {
        let base = match self.config {
            Some(ref path) => LocatorConfig::from_file(path)?,
            None => LocatorConfig::default(),
        };

        let config = base.with_overrides(self.temp_dir.clone(), self.on_stat_error);
        config.validate()?;
        Ok(config)
    }
}

/// Print an error message to stderr
pub fn print_error(error: &str) {
    output::print_error(error);
}
