//! Structured (JSON) representation of the article set.
//!
//! A pretty-printed array of objects with the same field names and order as
//! the CSV columns.

use crate::error::PersistenceError;
use crate::models::Article;

pub const FILE_NAME: &str = "articles.json";

/// Encode `articles` as a pretty-printed JSON array (2-space indent).
pub fn encode(articles: &[Article]) -> Result<Vec<u8>, PersistenceError> {
    let mut bytes = serde_json::to_vec_pretty(articles)?;
    bytes.push(b'\n');
    Ok(bytes)
}
