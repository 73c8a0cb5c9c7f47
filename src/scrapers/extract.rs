//! Selector-driven extraction of article fields from a source page.
//!
//! A page is split into fragments with the source's article selector, then
//! each fragment is searched for the title, link, date and summary. Title and
//! link element are mandatory: a fragment missing either is reported as an
//! [`ExtractionError`] and skipped by the caller.

use crate::error::ExtractionError;
use crate::models::ArticleFields;
use crate::scrapers::selector::{SelectorExpr, SourceRules};
use crate::utils::looks_absolute;
use scraper::{ElementRef, Html};

/// Candidate article fragments in document order, capped at `max_articles`.
pub fn extract_fragments<'a>(document: &'a Html, rules: &SourceRules) -> Vec<ElementRef<'a>> {
    document
        .select(rules.article.selector())
        .take(rules.max_articles)
        .collect()
}

/// Pull the article fields out of a single fragment.
pub fn extract_fields(
    fragment: ElementRef<'_>,
    rules: &SourceRules,
) -> Result<ArticleFields, ExtractionError> {
    let title_el = first_match(fragment, &rules.title).ok_or(ExtractionError::MissingTitle)?;
    let title = element_text(title_el);
    if title.is_empty() {
        return Err(ExtractionError::EmptyTitle);
    }

    let url_el = first_match(fragment, &rules.url).ok_or(ExtractionError::MissingUrlTarget)?;
    let url = resolve_url(link_target(url_el), rules.base_url.as_deref());

    let date_text = optional_text(fragment, rules.date.as_ref());
    let summary = optional_text(fragment, rules.summary.as_ref());

    Ok(ArticleFields {
        title,
        url,
        date_text,
        summary,
    })
}

fn first_match<'a>(fragment: ElementRef<'a>, expr: &SelectorExpr) -> Option<ElementRef<'a>> {
    fragment.select(expr.selector()).next()
}

/// All descendant text, concatenated and trimmed.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn optional_text(fragment: ElementRef<'_>, expr: Option<&SelectorExpr>) -> String {
    expr.and_then(|expr| first_match(fragment, expr))
        .map(element_text)
        .unwrap_or_default()
}

/// The `href` of an anchor; any other element carries no link.
fn link_target(element: ElementRef<'_>) -> &str {
    if element.value().name() == "a" {
        element.value().attr("href").unwrap_or("").trim()
    } else {
        ""
    }
}

/// Prefix relative links with the source's base URL.
///
/// Empty and already absolute links are returned unchanged, as is every link
/// when no base URL is configured.
pub fn resolve_url(raw: &str, base_url: Option<&str>) -> String {
    match base_url {
        Some(base) if !raw.is_empty() && !looks_absolute(raw) => format!("{base}{raw}"),
        _ => raw.to_string(),
    }
}
