//! Operator-facing progress reporting.
//!
//! The pipeline tells a [`Progress`] implementation when it starts a source,
//! how many articles it got and why a source failed. Lines are purely
//! informational; nothing parses them.

use crate::config::SourceGroup;
use crate::error::SourceError;
use tracing::{error, info};

/// Receives per-source progress events. Must tolerate concurrent callers.
pub trait Progress: Send + Sync {
    fn source_started(&self, group: SourceGroup, source: &str);
    fn source_collected(&self, group: SourceGroup, source: &str, count: usize);
    fn source_failed(&self, source: &str, error: &SourceError);
    fn run_finished(&self, sources: usize, total: usize);
}

/// Reports progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn source_started(&self, group: SourceGroup, source: &str) {
        info!(%group, source, "Collecting from source");
    }

    fn source_collected(&self, group: SourceGroup, source: &str, count: usize) {
        info!(%group, source, count, "Articles collected");
    }

    fn source_failed(&self, source: &str, error: &SourceError) {
        error!(
            source,
            error = %error,
            timed_out = error.is_timeout(),
            "Source collection failed"
        );
    }

    fn run_finished(&self, sources: usize, total: usize) {
        info!(sources, total, "Collection run finished");
    }
}
