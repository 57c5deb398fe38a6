//! Directory-backed media store.

use super::{MediaStore, StoredMedia};
use crate::audio::AudioFormat;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const INDEX_FILE: &str = ".media-index.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    file_name: String,
    file_size: u64,
    format: AudioFormat,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MediaIndex {
    next_id: u64,
    entries: BTreeMap<u64, IndexEntry>,
}

/// Writes files into `root` and serves them as `{base_url}/{file_name}`.
///
/// Ids survive restarts through an index file kept next to the media.
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
    index: Mutex<MediaIndex>,
}

impl LocalMediaStore {
    /// Opens (creating if needed) the store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid media base URL: {}", e),
                ErrorContext::new().with_field_path("media.base_url"),
            )
        })?;
        tokio::fs::create_dir_all(&root).await?;

        let index = match tokio::fs::read(root.join(INDEX_FILE)).await {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MediaIndex::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: Mutex::new(index),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn to_media(&self, id: u64, entry: &IndexEntry) -> StoredMedia {
        StoredMedia {
            id,
            url: format!("{}/{}", self.base_url, entry.file_name),
            path: self.root.join(&entry.file_name),
            file_size: entry.file_size,
            format: entry.format,
        }
    }

    async fn save_index(&self, index: &MediaIndex) -> Result<()> {
        let path = self.root.join(INDEX_FILE);
        let tmp = self.root.join(format!("{}.tmp", INDEX_FILE));
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(index)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// First of `name`, `stem-1.ext`, `stem-2.ext`, ... not already on disk.
    async fn unique_file_name(&self, name: &str) -> Result<String> {
        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (name, None),
        };
        let mut candidate = name.to_string();
        let mut n = 1;
        while tokio::fs::try_exists(self.root.join(&candidate)).await? {
            candidate = match ext {
                Some(ext) => format!("{}-{}.{}", stem, n, ext),
                None => format!("{}-{}", stem, n),
            };
            n += 1;
        }
        Ok(candidate)
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, bytes: &[u8], filename: &str, format: AudioFormat) -> Result<StoredMedia> {
        let mut index = self.index.lock().await;
        let file_name = self.unique_file_name(&super::sanitize_file_name(filename)).await?;
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        let id = index.next_id.max(1);
        let entry = IndexEntry {
            file_name,
            file_size: bytes.len() as u64,
            format,
        };
        let media = self.to_media(id, &entry);
        let previous_next_id = index.next_id;
        index.next_id = id + 1;
        index.entries.insert(id, entry);
        if let Err(e) = self.save_index(&index).await {
            index.entries.remove(&id);
            index.next_id = previous_next_id;
            if let Err(remove_err) = tokio::fs::remove_file(&media.path).await {
                tracing::warn!(
                    path = %media.path.display(),
                    error = %remove_err,
                    "could not remove unindexed file"
                );
            }
            return Err(e);
        }

        tracing::info!(id, url = %media.url, bytes = media.file_size, "stored audio file");
        Ok(media)
    }

    async fn get(&self, id: u64) -> Result<Option<StoredMedia>> {
        let index = self.index.lock().await;
        Ok(index.entries.get(&id).map(|entry| self.to_media(id, entry)))
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let mut index = self.index.lock().await;
        let Some(entry) = index.entries.remove(&id) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(self.root.join(&entry.file_name)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(id, file = %entry.file_name, "media file already gone");
            }
            Err(e) => return Err(e.into()),
        }
        self.save_index(&index).await?;
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
