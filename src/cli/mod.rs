//! Command-line interface components
//!
//! CLI-specific code for the Photo Feed application: argument parsing and
//! command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, SearchArgs};
pub use commands::{handle_config, handle_search};
