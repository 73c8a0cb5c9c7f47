//! Error types for each stage of the collection pipeline.
//!
//! Errors are scoped to the unit of work that produced them:
//!
//! | Error | Scope | Handling |
//! |-------|-------|----------|
//! | [`FetchError`] | one source | source yields no articles, run continues |
//! | [`SelectorError`] | one source | source yields no articles, run continues |
//! | [`ExtractionError`] | one fragment | fragment skipped, source continues |
//! | [`PersistenceError`] | whole run | terminal |
//! | [`ConfigError`] | whole run | terminal, raised before any fetch |

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve the page of a single source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{source_name}: invalid url {url:?}: {cause}")]
    InvalidUrl {
        source_name: String,
        url: String,
        #[source]
        cause: url::ParseError,
    },

    #[error("{source_name}: request to {url} timed out")]
    Timeout {
        source_name: String,
        url: String,
        #[source]
        cause: reqwest::Error,
    },

    #[error("{source_name}: {url} answered with HTTP {status}")]
    Status {
        source_name: String,
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{source_name}: request to {url} failed: {cause}")]
    Transport {
        source_name: String,
        url: String,
        #[source]
        cause: reqwest::Error,
    },
}

impl FetchError {
    /// Classify a reqwest error raised while talking to `url`.
    pub fn from_reqwest(source_name: &str, url: &str, cause: reqwest::Error) -> Self {
        if cause.is_timeout() {
            FetchError::Timeout {
                source_name: source_name.to_string(),
                url: url.to_string(),
                cause,
            }
        } else {
            FetchError::Transport {
                source_name: source_name.to_string(),
                url: url.to_string(),
                cause,
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

/// A configured selector expression could not be compiled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {role} selector {expr:?}: {message}")]
pub struct SelectorError {
    /// Which configuration key held the expression (`article`, `title`, ...).
    pub role: &'static str,
    pub expr: String,
    pub message: String,
}

/// A fragment did not yield the mandatory article fields.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no element matched the title selector")]
    MissingTitle,

    #[error("title element has no text")]
    EmptyTitle,

    #[error("no element matched the url selector")]
    MissingUrlTarget,
}

/// Anything that aborts collection for one source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source for {url} has a blank name")]
    Unnamed { url: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

impl SourceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Fetch(e) if e.is_timeout())
    }
}

/// Writing one of the output representations failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create output directory {path}: {cause}")]
    CreateDir {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("failed to encode articles as CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode articles as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {cause}")]
    Write {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
}

/// The source list could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {cause}")]
    Read {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("failed to parse config {path}: {cause}")]
    Parse {
        path: PathBuf,
        #[source]
        cause: serde_yaml::Error,
    },

    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}
