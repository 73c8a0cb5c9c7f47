//! Keyword-based topical categorization.
//!
//! The lower-cased `title + " " + summary` is matched against a fixed table.
//! Labels are tried in priority order and the first one with any keyword
//! occurring as a substring wins; nothing matching yields
//! [`Category::General`].
//!
//! | Priority | Category | Keywords |
//! |----------|----------|----------|
//! | 1 | `maintenance` | mro, maintenance, repair, overhaul, service center |
//! | 2 | `fleet` | fleet, aircraft, delivery, order, acquisition |
//! | 3 | `technology` | technology, innovation, digital, electric, hybrid |
//! | 4 | `business` | financial, results, profit, revenue, contract |
//! | 5 | `regulatory` | certification, regulation, compliance, authority, faa, easa |

use serde::Serialize;
use std::fmt;

/// Topical label attached to every article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Maintenance,
    Fleet,
    Technology,
    Business,
    Regulatory,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Maintenance => "maintenance",
            Category::Fleet => "fleet",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Regulatory => "regulatory",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword table in priority order.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Maintenance,
        &["mro", "maintenance", "repair", "overhaul", "service center"],
    ),
    (
        Category::Fleet,
        &["fleet", "aircraft", "delivery", "order", "acquisition"],
    ),
    (
        Category::Technology,
        &["technology", "innovation", "digital", "electric", "hybrid"],
    ),
    (
        Category::Business,
        &["financial", "results", "profit", "revenue", "contract"],
    ),
    (
        Category::Regulatory,
        &["certification", "regulation", "compliance", "authority", "faa", "easa"],
    ),
];

/// Assign a category from an article's title and summary.
pub fn categorize(title: &str, summary: &str) -> Category {
    let text = format!("{title} {summary}").to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
