//! Data models for collected articles.
//!
//! - [`ArticleFields`]: raw values pulled out of one page fragment
//! - [`Article`]: the normalized, categorized record that gets persisted
//!
//! Field order of [`Article`] is the column order of the CSV output and the
//! key order of the JSON output, so keep it stable.

use crate::categorize::Category;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Values extracted from a single fragment, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    /// Trimmed, never empty.
    pub title: String,
    /// Link target, already prefixed with `base_url` when it was relative.
    pub url: String,
    /// Trimmed date text as shown on the page; empty when not found.
    pub date_text: String,
    pub summary: String,
}

/// A normalized article as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: DateTime<Utc>,
    pub summary: String,
    /// Name of the configured source the article came from.
    pub source: String,
    pub category: Category,
    #[serde(serialize_with = "serialize_timestamp")]
    pub collected_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        fields: ArticleFields,
        source: &str,
        category: Category,
        date: DateTime<Utc>,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Article {
            title: fields.title,
            url: fields.url,
            date,
            summary: fields.summary,
            source: source.to_string(),
            category,
            collected_at,
        }
    }
}

/// Render a timestamp in the canonical form used by every output.
///
/// RFC 3339, UTC, second precision: `2025-05-06T14:30:00Z`.
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&canonical_timestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample() -> Article {
        let fields = ArticleFields {
            title: "Lufthansa Technik opens new overhaul hangar".to_string(),
            url: "https://example.com/news/1".to_string(),
            date_text: "May 6, 2025".to_string(),
            summary: "The facility adds capacity.".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap();
        Article::new(fields, "MRO Network", Category::Maintenance, now, now)
    }

    #[test]
    fn test_canonical_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap();
        assert_eq!(canonical_timestamp(&ts), "2025-05-06T14:30:00Z");
    }

    #[test]
    fn test_article_serialization_keeps_field_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"title":"Lufthansa Technik opens new overhaul hangar","#,
                r#""url":"https://example.com/news/1","#,
                r#""date":"2025-05-06T14:30:00Z","#,
                r#""summary":"The facility adds capacity.","#,
                r#""source":"MRO Network","#,
                r#""category":"maintenance","#,
                r#""collected_at":"2025-05-06T14:30:00Z"}"#
            )
        );
    }

    #[test]
    fn test_article_new_copies_source() {
        let article = sample();
        assert_eq!(article.source, "MRO Network");
        assert_eq!(article.category, Category::Maintenance);
    }
}
