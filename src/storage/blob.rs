use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// Append-only JSON object store. Every `store` call writes a new,
/// uniquely-named object under `<root>/<namespace>/`; `load_latest` reads
/// back the newest object in a namespace. Object names start with a
/// sortable UTC timestamp, so lexicographic order is creation order.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write one batch of records as a new object and return its path.
    pub async fn store<T: Serialize>(&self, records: &[T], namespace: &str) -> Result<String> {
        let dir = self.root.join(namespace);
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;

        let object = format!(
            "{}_{}.json",
            Utc::now().format("%Y-%m-%d_%H-%M-%S"),
            Uuid::new_v4()
        );
        let path = dir.join(object);

        let body = serde_json::to_vec_pretty(records)?;
        let mut file = fs::File::create(&path)
            .await
            .with_context(|| format!("creating {}", path.display()))?;
        file.write_all(&body).await?;

        debug!(path = %path.display(), count = records.len(), "stored records");
        Ok(path.display().to_string())
    }

    /// Read the most recently written object in a namespace. `None` when
    /// the namespace has never been written.
    pub async fn load_latest<T: DeserializeOwned>(&self, namespace: &str) -> Result<Option<Vec<T>>> {
        let dir = self.root.join(namespace);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(_) => return Ok(None),
        };

        let mut latest: Option<PathBuf> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && latest
                    .as_ref()
                    .is_none_or(|current| path.file_name() > current.file_name())
            {
                latest = Some(path);
            }
        }

        let Some(path) = latest else {
            return Ok(None);
        };

        let body = fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let records = serde_json::from_slice(&body)
            .with_context(|| format!("decoding {}", path.display()))?;

        debug!(path = %path.display(), "loaded latest object");
        Ok(Some(records))
    }
}
