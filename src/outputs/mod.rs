//! Persistence of the collected article set.
//!
//! Every non-empty run replaces two files in the output directory:
//!
//! ```text
//! data/
//! ├── articles.csv   # tabular, one row per article
//! └── articles.json  # structured, same records
//! ```
//!
//! Both payloads are encoded before anything touches the disk, and each file
//! is written to a temporary sibling and renamed into place. An empty run
//! leaves the directory alone so the dashboard keeps showing the last data.

pub mod json;
pub mod tabular;

use crate::error::PersistenceError;
use crate::models::Article;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Where a persisted run ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct ArticleStore {
    dir: PathBuf,
}

impl ArticleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(tabular::FILE_NAME)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(json::FILE_NAME)
    }

    /// Write `articles` in both representations.
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is
    /// nothing to write.
    #[instrument(level = "info", skip_all, fields(dir = %self.dir.display(), count = articles.len()))]
    pub async fn persist(
        &self,
        articles: &[Article],
    ) -> Result<Option<PersistedFiles>, PersistenceError> {
        if articles.is_empty() {
            info!("No articles to persist; leaving existing files untouched");
            return Ok(None);
        }

        let csv_bytes = tabular::encode(articles)?;
        let json_bytes = json::encode(articles)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|cause| PersistenceError::CreateDir {
                path: self.dir.clone(),
                cause,
            })?;

        let files = PersistedFiles {
            csv: self.csv_path(),
            json: self.json_path(),
            count: articles.len(),
        };
        write_replace(&files.csv, &csv_bytes).await?;
        write_replace(&files.json, &json_bytes).await?;

        info!(
            total = files.count,
            csv = %files.csv.display(),
            json = %files.json.display(),
            "Articles saved"
        );
        Ok(Some(files))
    }
}

/// Write `bytes` next to `path`, then rename over it.
async fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let write_err = |cause| PersistenceError::Write {
        path: path.to_path_buf(),
        cause,
    };
    fs::write(&tmp, bytes).await.map_err(write_err)?;
    if let Err(cause) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(write_err(cause));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::Category;
    use crate::dates::tests::fixed_now;
    use crate::models::ArticleFields;
    use pretty_assertions::assert_eq;

    fn articles() -> Vec<Article> {
        ["Fleet update", "Digital twin for engines"]
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let fields = ArticleFields {
                    title: title.to_string(),
                    url: format!("https://example.com/{i}"),
                    date_text: String::new(),
                    summary: String::new(),
                };
                Article::new(fields, "Simple Flying", Category::Fleet, fixed_now(), fixed_now())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_persist_empty_is_noop() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");
        let store = ArticleStore::new(&dir);

        assert_eq!(store.persist(&[]).await.unwrap(), None);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_persist_empty_keeps_previous_files() {
        let root = tempfile::tempdir().unwrap();
        let store = ArticleStore::new(root.path());
        store.persist(&articles()).await.unwrap();
        let before = std::fs::read(store.csv_path()).unwrap();

        store.persist(&[]).await.unwrap();
        assert_eq!(std::fs::read(store.csv_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_persist_writes_both_files() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("data");
        let store = ArticleStore::new(&dir);

        let files = store.persist(&articles()).await.unwrap().unwrap();
        assert_eq!(files.count, 2);
        assert_eq!(files.csv, dir.join("articles.csv"));
        assert_eq!(files.json, dir.join("articles.json"));

        let csv = std::fs::read_to_string(&files.csv).unwrap();
        assert_eq!(csv.lines().count(), 3);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&files.json).unwrap()).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["title"], "Digital twin for engines");

        // no temporary files left behind
        let names: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{names:?}");
    }

    #[tokio::test]
    async fn test_persist_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let store = ArticleStore::new(root.path());

        store.persist(&articles()).await.unwrap();
        let first = (
            std::fs::read(store.csv_path()).unwrap(),
            std::fs::read(store.json_path()).unwrap(),
        );
        store.persist(&articles()).await.unwrap();
        let second = (
            std::fs::read(store.csv_path()).unwrap(),
            std::fs::read(store.json_path()).unwrap(),
        );
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_persist_replaces_previous_run() {
        let root = tempfile::tempdir().unwrap();
        let store = ArticleStore::new(root.path());
        store.persist(&articles()).await.unwrap();

        let all = articles();
        store.persist(&all[..1]).await.unwrap();
        let csv = std::fs::read_to_string(store.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_persist_reports_unwritable_directory() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = ArticleStore::new(blocker.join("data"));
        let err = store.persist(&articles()).await.unwrap_err();
        assert!(matches!(err, PersistenceError::CreateDir { .. }));
    }
}
