//! Photo Feed CLI application
//!
//! Command-line front end for querying the public photo feed.

use std::process;

use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use photo_feed::cli::{handle_config, handle_search, Cli, Commands};
use photo_feed::config::AppConfig;
use photo_feed::constants::logging::LOG_TARGET;
use photo_feed::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let level_override = cli.log_level_override();
    let show_levels = cli.global.very_verbose;

    match cli.command {
        Commands::Search(args) => {
            let config = AppConfig::load(cli.global.config).await?;
            init_logging(level_override, &config, show_levels);
            info!("Photo Feed v{} starting", env!("CARGO_PKG_VERSION"));
            handle_search(args, config).await
        }
        Commands::Config(args) => {
            init_logging(level_override, &AppConfig::default(), show_levels);
            handle_config(args, cli.global.config).await
        }
    }
}

/// Initialize logging from CLI flags, falling back to the configured level
fn init_logging(level_override: Option<Level>, config: &AppConfig, show_levels: bool) {
    let level = match level_override {
        Some(level) => level.to_string().to_lowercase(),
        None => config.logging.level.clone(),
    };

    let mut filter = EnvFilter::from_default_env();
    match format!("{}={}", LOG_TARGET, level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(show_levels)
        .init();
}
