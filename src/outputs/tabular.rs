//! Tabular (CSV) representation of the article set.
//!
//! One header row followed by one record per article. Columns follow the
//! field order of [`Article`]:
//!
//! ```text
//! title,url,date,summary,source,category,collected_at
//! ```

use crate::error::PersistenceError;
use crate::models::Article;

pub const FILE_NAME: &str = "articles.csv";

/// Encode `articles` as CSV bytes, header included.
pub fn encode(articles: &[Article]) -> Result<Vec<u8>, PersistenceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for article in articles {
        writer.serialize(article)?;
    }
    writer
        .into_inner()
        .map_err(|e| PersistenceError::Csv(e.into_error().into()))
}
