//! Source configuration loaded once at startup.
//!
//! The YAML file carries two lists of scrape targets, `news_sources` and
//! `press_sources`. Both are handled identically by the pipeline; the group
//! only changes how progress is labelled. Keys the collector does not know
//! about (the dashboard keeps its own sections in the same file) are ignored.
//!
//! ```yaml
//! news_sources:
//!   - name: Aviation Week MRO
//!     url: https://aviationweek.com/mro
//!     base_url: https://aviationweek.com
//!     article_selector: article.teaser
//!     title_selector: h3
//!     url_selector: a
//!     date_selector: time
//!     max_articles: 10
//! press_sources: []
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Default cap on fragments processed per source.
pub const DEFAULT_MAX_ARTICLES: usize = 5;

fn default_max_articles() -> usize {
    DEFAULT_MAX_ARTICLES
}

/// Declarative description of one scrape target.
///
/// Never mutated once loaded; the pipeline only borrows it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Label used for reporting and copied onto every article.
    pub name: String,
    /// The page to fetch.
    pub url: String,
    /// Prefix for relative article links.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Selects one fragment per candidate article.
    pub article_selector: String,
    pub title_selector: String,
    pub url_selector: String,
    #[serde(default)]
    pub date_selector: Option<String>,
    #[serde(default)]
    pub summary_selector: Option<String>,
    /// Upper bound on fragments taken from the page, in document order.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
}

/// Which configured list a source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceGroup {
    News,
    Press,
}

impl SourceGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceGroup::News => "news",
            SourceGroup::Press => "press",
        }
    }
}

impl fmt::Display for SourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full set of sources for one run.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CollectorConfig {
    #[serde(default)]
    pub news_sources: Vec<SourceConfig>,
    #[serde(default)]
    pub press_sources: Vec<SourceConfig>,
}

impl CollectorConfig {
    /// All sources in run order: every news source, then every press source.
    pub fn sources(&self) -> impl Iterator<Item = (SourceGroup, &SourceConfig)> {
        self.news_sources
            .iter()
            .map(|s| (SourceGroup::News, s))
            .chain(self.press_sources.iter().map(|s| (SourceGroup::Press, s)))
    }

    pub fn source_count(&self) -> usize {
        self.news_sources.len() + self.press_sources.len()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Check what serde cannot: every source needs a non-blank name, since
    /// it is copied onto each article.
    pub fn validate(&self) -> Result<(), String> {
        let groups = [
            (SourceGroup::News, &self.news_sources),
            (SourceGroup::Press, &self.press_sources),
        ];
        for (group, sources) in groups {
            if let Some(index) = sources.iter().position(|s| s.name.trim().is_empty()) {
                return Err(format!("{group}_sources[{index}] has a blank name"));
            }
        }
        Ok(())
    }
}

/// Read and parse the YAML configuration at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_config(path: &Path) -> Result<CollectorConfig, ConfigError> {
    let yaml = fs::read_to_string(path)
        .await
        .map_err(|cause| ConfigError::Read {
            path: path.to_path_buf(),
            cause,
        })?;

    let config = CollectorConfig::from_yaml(&yaml).map_err(|cause| ConfigError::Parse {
        path: path.to_path_buf(),
        cause,
    })?;
    config.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;

    info!(
        news = config.news_sources.len(),
        press = config.press_sources.len(),
        "Loaded source configuration"
    );
    debug!(?config, "Configuration");
    Ok(config)
}
