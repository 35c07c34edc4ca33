//! Command handlers for Photo Feed CLI
//!
//! This module implements the command handlers that connect CLI arguments to
//! the feed query pipeline and the configuration layer.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{error, info};

use crate::app::{DownloadStatus, FeedQuery, FeedResult, HttpHandler};
use crate::cli::{ConfigAction, ConfigArgs, SearchArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Handle the search command
///
/// Runs one feed query in the requested dispatch mode and prints the photos
/// it returns.
pub async fn handle_search(args: SearchArgs, config: AppConfig) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let start_time = Instant::now();
    let http = HttpHandler::from_config(&config.client.to_runtime_config())?;
    let query = FeedQuery::new(http, args.apply_to(config.feed))?;

    info!(
        "Searching feed for '{}' ({:?})",
        args.terms,
        args.dispatch()
    );

    let mut delivered = None;
    query
        .run(&args.terms, args.dispatch(), |result| {
            on_data_available(&result);
            delivered = Some(result);
        })
        .await;

    let result = delivered.unwrap_or_else(|| FeedResult::failed(DownloadStatus::FailedOrEmpty));
    info!("Search finished in {:.2?}", start_time.elapsed());

    if !result.is_ok() {
        return Err(AppError::generic(format!(
            "Feed query failed with status {}",
            result.status
        )));
    }

    print_photos(&result);
    Ok(())
}

/// Caller-side handling of a delivered feed result
fn on_data_available(result: &FeedResult) {
    if result.status == DownloadStatus::Ok {
        info!("on_data_available: received {} photos", result.photos.len());
    } else {
        error!("on_data_available: failed with status {}", result.status);
    }
}

fn print_photos(result: &FeedResult) {
    if result.photos.is_empty() {
        println!("No photos found.");
        return;
    }

    for (index, photo) in result.photos.iter().enumerate() {
        println!("{:>3}. {}", index + 1, photo.title());
        println!("     by {} ({})", photo.author(), photo.author_id());
        println!("     tags:  {}", photo.tags());
        println!("     thumb: {}", photo.image());
        println!("     full:  {}", photo.link());
    }
    println!();
    println!("{} photos", result.photos.len());
}

/// Handle configuration management commands
pub async fn handle_config(args: ConfigArgs, config_override: Option<PathBuf>) -> Result<()> {
    match args.action {
        ConfigAction::Init { force, path } => {
            let path = match path {
                Some(path) => path,
                None => AppConfig::default_config_path()?,
            };

            if AppConfig::write_default(&path, force).await? {
                println!("Created configuration file: {}", path.display());
            } else {
                println!(
                    "Configuration file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }
        }
        ConfigAction::Show => {
            let config = AppConfig::load(config_override).await?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
