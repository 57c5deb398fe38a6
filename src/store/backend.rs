//! Option store backends.

use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Returns whether the key existed.
    async fn delete(&self, key: &str) -> Result<bool>;
    fn name(&self) -> &'static str;
}

#[derive(Default, Clone)]
pub struct MemoryOptionStore {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. with an API key for a test.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.values.write().await.remove(key).is_some())
    }
    fn name(&self) -> &'static str {
        "memory"
    }
}

/// All options in one JSON object file.
///
/// The file is read on every `get` and rewritten through a sibling temp file
/// and a rename on every change, so readers never see a half-written file.
/// A missing file reads as empty.
pub struct JsonFileOptionStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileOptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                Error::configuration_with_context(
                    format!("option file is not a JSON object of strings: {}", e),
                    ErrorContext::new().with_field_path(self.path.display().to_string()),
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(values)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OptionStore for JsonFileOptionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values).await
    }
    async fn delete(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&values).await?;
        Ok(true)
    }
    fn name(&self) -> &'static str {
        "json_file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryOptionStore::with_values([("a", "1")]);
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        store.set("b", "2").await.unwrap();
        assert!(store.delete("b").await.unwrap());
        assert!(!store.delete("b").await.unwrap());
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("options.json");
        let store = JsonFileOptionStore::new(&path);

        assert_eq!(store.get("missing").await.unwrap(), None);
        store.set("stts_language_code", "de-DE").await.unwrap();
        store.set("stts_usage_limit", "5000").await.unwrap();

        let reopened = JsonFileOptionStore::new(&path);
        assert_eq!(
            reopened.get("stts_language_code").await.unwrap().as_deref(),
            Some("de-DE")
        );
        assert!(reopened.delete("stts_usage_limit").await.unwrap());
        assert_eq!(store.get("stts_usage_limit").await.unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_json_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let store = JsonFileOptionStore::new(&path);
        assert!(matches!(
            store.get("x").await,
            Err(Error::Configuration { .. })
        ));
    }
}
