//! # Aero News Collector
//!
//! Collects aviation industry news and press releases from a configurable
//! list of web pages, tags each article with a topical category and stores
//! the result for the intelligence dashboard.
//!
//! ## Usage
//!
//! ```sh
//! aero_news_collector -c config.yaml -o ./data
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: load news and press sources from YAML
//! 2. **Collection**: per source, fetch the page, extract article fragments
//!    with the configured CSS selectors, normalize dates and categorize
//! 3. **Output**: write `articles.csv` and `articles.json`
//!
//! A source that fails (network, HTTP status, bad selector) contributes no
//! articles and is reported; the run carries on with the next one. Only a
//! missing configuration or a failed write ends the process with an error.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod categorize;
mod cli;
mod config;
mod dates;
mod error;
mod models;
mod outputs;
mod progress;
mod scrapers;
mod utils;

use cli::Cli;
use dates::{DateMode, DateNormalizer, SystemClock};
use outputs::ArticleStore;
use progress::TracingProgress;
use scrapers::collector::SourceCollector;
use scrapers::fetch::HttpFetcher;
use scrapers::run::CollectionRun;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("aero_news_collector starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match config::load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot load source configuration");
            return Err(e.into());
        }
    };
    if config.source_count() == 0 {
        warn!(path = %args.config.display(), "No sources configured");
    }

    let mode = if args.parse_dates {
        DateMode::Parse
    } else {
        DateMode::CollectionTime
    };
    let dates = DateNormalizer::new(mode);
    info!(mode = ?dates.mode(), concurrency = args.concurrency, "Collection settings");

    let collector = SourceCollector::new(
        HttpFetcher::new()?,
        dates,
        Arc::new(SystemClock),
        Arc::new(TracingProgress),
    );
    let articles = CollectionRun::new(&collector, usize::from(args.concurrency))
        .run(&config)
        .await;

    let store = ArticleStore::new(&args.output_dir);
    if let Err(e) = store.persist(&articles).await {
        error!(error = %e, "Failed to persist articles");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = articles.len(),
        sources = config.source_count(),
        "Execution complete"
    );

    Ok(())
}
