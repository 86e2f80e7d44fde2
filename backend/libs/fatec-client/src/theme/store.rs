/// Key-value persistence for the theme preference
use crate::error::ThemeStoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// Storage key holding `"light"` or `"dark"`
pub const THEME_KEY: &str = "@theme";

#[async_trait]
pub trait ThemeStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ThemeStoreError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeStoreError>;
}

/// JSON object on disk, one entry per key
pub struct FileThemeStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, ThemeStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ThemeStore for FileThemeStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ThemeStoreError> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&map)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), key, "theme store updated");
        Ok(())
    }
}

/// Process-local store, shared through `Arc` to simulate restarts in tests
#[derive(Default)]
pub struct MemoryThemeStore {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThemeStore for MemoryThemeStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ThemeStoreError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeStoreError> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
