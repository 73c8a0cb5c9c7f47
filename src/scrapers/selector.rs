//! Typed selector expressions.
//!
//! Selectors in the configuration are CSS selectors as understood by the
//! `scraper` crate: type (`article`), class (`.teaser`), id (`#main`),
//! attribute (`a[href]`, `[data-kind="press"]`), descendant and child
//! combinators (`div.list > h3 a`), structural pseudo classes
//! (`li:first-child`) and comma-separated groups (`h2, h3`).
//!
//! Expressions are compiled once per source by [`SourceRules::compile`].
//! A bad expression fails the whole source, never the run.

use crate::config::SourceConfig;
use crate::error::SelectorError;
use scraper::Selector;
use std::fmt;

/// A validated CSS selector that remembers its source text.
#[derive(Debug, Clone)]
pub struct SelectorExpr {
    raw: String,
    compiled: Selector,
}

impl SelectorExpr {
    /// Compile `raw`. `role` names the configuration key for diagnostics.
    pub fn parse(role: &'static str, raw: &str) -> Result<Self, SelectorError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SelectorError {
                role,
                expr: raw.to_string(),
                message: "selector is empty".to_string(),
            });
        }
        let compiled = Selector::parse(trimmed).map_err(|e| SelectorError {
            role,
            expr: raw.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            raw: trimmed.to_string(),
            compiled,
        })
    }

    /// Compile an optional selector; absent or blank means "not configured".
    pub fn parse_optional(
        role: &'static str,
        raw: Option<&str>,
    ) -> Result<Option<Self>, SelectorError> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::parse(role, raw).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn selector(&self) -> &Selector {
        &self.compiled
    }
}

impl fmt::Display for SelectorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled extraction rules for one source.
#[derive(Debug, Clone)]
pub struct SourceRules {
    pub article: SelectorExpr,
    pub title: SelectorExpr,
    pub url: SelectorExpr,
    pub date: Option<SelectorExpr>,
    pub summary: Option<SelectorExpr>,
    pub base_url: Option<String>,
    pub max_articles: usize,
}

impl SourceRules {
    pub fn compile(source: &SourceConfig) -> Result<Self, SelectorError> {
        Ok(Self {
            article: SelectorExpr::parse("article", &source.article_selector)?,
            title: SelectorExpr::parse("title", &source.title_selector)?,
            url: SelectorExpr::parse("url", &source.url_selector)?,
            date: SelectorExpr::parse_optional("date", source.date_selector.as_deref())?,
            summary: SelectorExpr::parse_optional("summary", source.summary_selector.as_deref())?,
            base_url: source
                .base_url
                .as_ref()
                .filter(|b| !b.trim().is_empty())
                .cloned(),
            max_articles: source.max_articles,
        })
    }
}
