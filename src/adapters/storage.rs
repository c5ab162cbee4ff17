use crate::domain::ports::CartRepository;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_cart_key;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stores each key as `<key>.json` inside a base directory.
#[derive(Debug, Clone)]
pub struct FileCartRepository {
    base_path: PathBuf,
}

impl FileCartRepository {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_cart_key("storage.cart_key", key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl CartRepository for FileCartRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // 內容壞掉屬於購物車資料問題，不是儲存空間問題
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| BookingError::InvalidCart {
                reason: format!("{} is not valid UTF-8: {}", path.display(), e),
            })
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.base_path).await?;
        tokio::fs::write(&path, value).await?;
        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCartRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartRepository for MemoryCartRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
