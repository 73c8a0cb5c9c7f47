//! A full collection run over every configured source.
//!
//! Sources are visited news group first, then press group, each in
//! configured order. With `concurrency > 1` several sources are fetched at
//! once, but results are still merged in that same order, so the output does
//! not depend on which server answers first.

use crate::config::CollectorConfig;
use crate::models::Article;
use crate::scrapers::collector::SourceCollector;
use crate::scrapers::fetch::PageFetcher;
use futures::stream::{self, StreamExt};
use tracing::instrument;

pub struct CollectionRun<'a, F> {
    collector: &'a SourceCollector<F>,
    concurrency: usize,
}

impl<'a, F: PageFetcher> CollectionRun<'a, F> {
    /// `concurrency` is the number of sources in flight; 0 is treated as 1.
    pub fn new(collector: &'a SourceCollector<F>, concurrency: usize) -> Self {
        Self {
            collector,
            concurrency: concurrency.max(1),
        }
    }

    /// Collect every source and concatenate the results.
    ///
    /// A failing source contributes nothing and never stops the others.
    #[instrument(level = "info", skip_all, fields(sources = config.source_count(), concurrency = self.concurrency))]
    pub async fn run(&self, config: &CollectorConfig) -> Vec<Article> {
        let collector = self.collector;
        let progress = collector.progress();

        let per_source: Vec<Vec<Article>> = stream::iter(config.sources())
            .map(|(group, source)| async move {
                progress.source_started(group, &source.name);
                let articles = collector.collect(source).await;
                progress.source_collected(group, &source.name, articles.len());
                articles
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let articles: Vec<Article> = per_source.into_iter().flatten().collect();
        progress.run_finished(config.source_count(), articles.len());
        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateMode;
    use crate::dates::tests::{FixedClock, fixed_now};
    use crate::dates::DateNormalizer;
    use crate::progress::tests::RecordingProgress;
    use crate::scrapers::collector::tests::{StubFetcher, THREE_ARTICLES, collector_with};
    use crate::scrapers::fetch::HttpFetcher;
    use crate::scrapers::selector::tests::source;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    fn page(titles: &[&str]) -> String {
        titles
            .iter()
            .map(|t| format!(r#"<div class="article"><h2>{t}</h2><a href="/{t}">x</a></div>"#))
            .collect()
    }

    fn titles(articles: &[Article]) -> Vec<String> {
        articles.iter().map(|a| a.title.clone()).collect()
    }

    fn two_group_config() -> CollectorConfig {
        CollectorConfig {
            news_sources: vec![source("News A"), source("News B")],
            press_sources: vec![source("Press A")],
        }
    }

    #[tokio::test]
    async fn test_run_orders_news_before_press() {
        let fetcher = StubFetcher::default()
            .with_page("News A", &page(&["a1", "a2"]))
            .with_page("News B", &page(&["b1"]))
            .with_page("Press A", &page(&["p1", "p2"]));
        let (collector, progress) = collector_with(fetcher, DateMode::CollectionTime);

        let articles = CollectionRun::new(&collector, 1).run(&two_group_config()).await;

        assert_eq!(titles(&articles), vec!["a1", "a2", "b1", "p1", "p2"]);
        assert_eq!(
            progress.lines(),
            vec![
                "start news News A",
                "collected news News A 2",
                "start news News B",
                "collected news News B 1",
                "start press Press A",
                "collected press Press A 2",
                "finished 3 5",
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_source_is_isolated() {
        let fetcher = StubFetcher::default()
            .with_page("News A", &page(&["a1"]))
            .with_page("Press A", &page(&["p1"]));
        let (collector, progress) = collector_with(fetcher, DateMode::CollectionTime);

        let articles = CollectionRun::new(&collector, 1).run(&two_group_config()).await;

        assert_eq!(titles(&articles), vec!["a1", "p1"]);
        let lines = progress.lines();
        assert!(lines.iter().any(|l| l.starts_with("failed News B:")));
        assert!(lines.contains(&"collected news News B 0".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_run_keeps_configured_order() {
        // The first source is the slowest; output order must not change.
        let fetcher = StubFetcher::default()
            .with_page("News A", &page(&["a1"]))
            .with_delay("News A", Duration::from_millis(150))
            .with_page("News B", &page(&["b1"]))
            .with_delay("News B", Duration::from_millis(50))
            .with_page("Press A", &page(&["p1"]));
        let (collector, _) = collector_with(fetcher, DateMode::CollectionTime);

        let articles = CollectionRun::new(&collector, 3).run(&two_group_config()).await;

        assert_eq!(titles(&articles), vec!["a1", "b1", "p1"]);
    }

    #[tokio::test]
    async fn test_empty_config_yields_nothing() {
        let (collector, progress) = collector_with(StubFetcher::default(), DateMode::CollectionTime);
        let articles = CollectionRun::new(&collector, 0)
            .run(&CollectorConfig::default())
            .await;
        assert!(articles.is_empty());
        assert_eq!(progress.lines(), vec!["finished 0 0"]);
    }

    #[tokio::test]
    async fn test_timed_out_source_does_not_affect_working_source() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body(THREE_ARTICLES);
        });
        server.mock(|when, then| {
            when.method(GET).path("/fast");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(THREE_ARTICLES);
        });

        let mut slow = source("Slow Source");
        slow.url = server.url("/slow");
        let mut fast = source("Fast Source");
        fast.url = server.url("/fast");
        let config = CollectorConfig {
            news_sources: vec![slow, fast],
            press_sources: vec![],
        };

        let progress = Arc::new(RecordingProgress::default());
        let collector = SourceCollector::new(
            HttpFetcher::with_timeout(Duration::from_millis(200)).unwrap(),
            DateNormalizer::default(),
            Arc::new(FixedClock(fixed_now())),
            progress.clone(),
        );

        let articles = CollectionRun::new(&collector, 1).run(&config).await;

        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|a| a.source == "Fast Source"));
        let lines = progress.lines();
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("failed Slow Source:") && l.contains("timed out")),
            "missing diagnostic: {lines:?}"
        );
    }
}
