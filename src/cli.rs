//! Command-line interface definitions.
//!
//! Every option has a default, so a bare `aero_news_collector` in a directory
//! holding `config.yaml` collects into `./data`.

use clap::Parser;
use std::path::PathBuf;

/// Collect aviation news and press releases into `articles.csv` and `articles.json`.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./config.yaml -> ./data
/// aero_news_collector
///
/// # Parse the dates shown on the pages, fetch four sources at a time
/// aero_news_collector -c sources.yaml -o /srv/dashboard/data --parse-dates --concurrency 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML source configuration
    #[arg(short, long, env = "AERO_NEWS_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Directory that receives articles.csv and articles.json
    #[arg(short, long, env = "AERO_NEWS_OUTPUT_DIR", default_value = "data")]
    pub output_dir: PathBuf,

    /// Parse the date text shown on each page instead of stamping collection time
    #[arg(long)]
    pub parse_dates: bool,

    /// Number of sources fetched at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,
}
