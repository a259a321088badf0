use clap::{Parser, Subcommand, ValueEnum};
use smartsearch_core::EscapeBehavior;
use std::path::PathBuf;

use crate::config::Theme;

/// Output format for one-shot lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One result per line
    #[default]
    Plain,
    /// JSON array of results
    Json,
}

/// Escape key behaviour as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EscapeArg {
    /// Clear the highlight and close the dropdown
    Close,
    /// Clear the highlight only
    Unhighlight,
}

impl From<EscapeArg> for EscapeBehavior {
    fn from(arg: EscapeArg) -> Self {
        match arg {
            EscapeArg::Close => EscapeBehavior::Close,
            EscapeArg::Unhighlight => EscapeBehavior::Unhighlight,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "smartsearch")]
#[command(about = "smartsearch - debounced search box with keyboard and mouse selection")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute (defaults to the interactive search box)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/smartsearch/config.toml)
    #[arg(short = 'C', long, global = true, env = "SMARTSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Quiet period before a lookup is dispatched, in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    /// What Escape does while the dropdown is open
    #[arg(long, global = true, value_enum)]
    pub escape: Option<EscapeArg>,

    /// Simulated lookup latency in milliseconds
    #[arg(long, global = true)]
    pub latency_ms: Option<u64>,

    /// Colour theme
    #[arg(long, global = true, value_enum)]
    pub theme: Option<Theme>,

    /// JSON file of search records to use instead of the built-in catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log file for the interactive mode (defaults to the user cache directory)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single lookup against the catalog and print the matches
    Lookup {
        /// Query text
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
}
