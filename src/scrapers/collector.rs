//! Per-source collection: fetch, extract, normalize, categorize.
//!
//! [`SourceCollector::collect`] never fails. A fetch or selector problem
//! costs the source all of its articles and is reported through
//! [`Progress::source_failed`]; a fragment without a title or link is
//! skipped and the rest of the page is still used.

use crate::categorize::categorize;
use crate::config::SourceConfig;
use crate::dates::{Clock, DateNormalizer};
use crate::error::SourceError;
use crate::models::Article;
use crate::progress::Progress;
use crate::scrapers::extract::{extract_fields, extract_fragments};
use crate::scrapers::fetch::PageFetcher;
use crate::scrapers::selector::SourceRules;
use crate::utils::truncate_for_log;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct SourceCollector<F> {
    fetcher: F,
    dates: DateNormalizer,
    clock: Arc<dyn Clock>,
    progress: Arc<dyn Progress>,
}

impl<F: PageFetcher> SourceCollector<F> {
    pub fn new(
        fetcher: F,
        dates: DateNormalizer,
        clock: Arc<dyn Clock>,
        progress: Arc<dyn Progress>,
    ) -> Self {
        Self {
            fetcher,
            dates,
            clock,
            progress,
        }
    }

    pub fn progress(&self) -> &dyn Progress {
        self.progress.as_ref()
    }

    /// Collect the articles of one source, turning every failure into an
    /// empty result.
    #[instrument(level = "info", skip_all, fields(source = %source.name))]
    pub async fn collect(&self, source: &SourceConfig) -> Vec<Article> {
        match self.try_collect(source).await {
            Ok(articles) => articles,
            Err(e) => {
                self.progress.source_failed(&source.name, &e);
                Vec::new()
            }
        }
    }

    /// Like [`collect`](Self::collect) but hands source-level errors back.
    pub async fn try_collect(&self, source: &SourceConfig) -> Result<Vec<Article>, SourceError> {
        if source.name.trim().is_empty() {
            return Err(SourceError::Unnamed {
                url: source.url.clone(),
            });
        }
        let rules = SourceRules::compile(source)?;
        let body = self.fetcher.fetch(source).await?;
        Ok(self.parse_page(source, &rules, &body))
    }

    /// Build articles from an already fetched page.
    pub fn parse_page(&self, source: &SourceConfig, rules: &SourceRules, body: &str) -> Vec<Article> {
        let document = Html::parse_document(body);
        let collected_at = self.clock.now();
        let fragments = extract_fragments(&document, rules);
        let found = fragments.len();

        let mut articles = Vec::with_capacity(found);
        for (index, fragment) in fragments.into_iter().enumerate() {
            let fields = match extract_fields(fragment, rules) {
                Ok(fields) => fields,
                Err(reason) => {
                    debug!(source = %source.name, index, %reason, "Skipping fragment");
                    continue;
                }
            };
            let category = categorize(&fields.title, &fields.summary);
            let date = self.dates.normalize(&fields.date_text, collected_at);
            debug!(
                index,
                title = %truncate_for_log(&fields.title, 80),
                %category,
                "Parsed article"
            );
            articles.push(Article::new(fields, &source.name, category, date, collected_at));
        }

        debug!(source = %source.name, found, kept = articles.len(), "Parsed source page");
        articles
    }
}
