//! Command-line argument parsing for Photo Feed
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{Dispatch, FeedConfig};
use crate::constants::feed;

/// Photo Feed - Browse the public photo feed from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "photo_feed",
    version,
    about = "Query the public Flickr photo feed by tag",
    long_about = "Fetches the public photo feed for a set of tags, decodes it and lists the photos found.
Searches can run on a background worker or inline on the calling task."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the feed for photos matching tags
    Search(SearchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the search command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Comma separated tags to search for
    #[arg(default_value = feed::DEFAULT_SEARCH_TERMS)]
    pub terms: String,

    /// Language code for the feed (overrides config)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Match any of the tags instead of all of them
    #[arg(long)]
    pub any: bool,

    /// Feed endpoint (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Run the fetch inline instead of on a background worker
    #[arg(long)]
    pub same_thread: bool,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Where to write (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level from global flags, if any were given
    pub fn log_level_override(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl SearchArgs {
    /// Check the arguments before any network work starts
    pub fn validate(&self) -> Result<(), String> {
        if self.terms.trim().is_empty() {
            return Err("Search terms must not be empty".to_string());
        }
        Ok(())
    }

    /// Dispatch mode selected on the command line
    pub fn dispatch(&self) -> Dispatch {
        if self.same_thread {
            Dispatch::SameThread
        } else {
            Dispatch::Background
        }
    }

    /// Apply command-line overrides on top of configured feed settings
    pub fn apply_to(&self, mut config: FeedConfig) -> FeedConfig {
        if let Some(ref lang) = self.lang {
            config.language = lang.clone();
        }
        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if self.any {
            config.match_all = false;
        }
        config
    }
}
