use async_trait::async_trait;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Fixed key of the company logo; each upload overwrites the previous one.
pub const LOGO_KEY: &str = "logo.png";

#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, replacing any existing object.
    async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError>;
}

/// Files under a local directory, also served at `/uploads`.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        let path = self.base_path.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("static/uploads"))
            .await
            .unwrap();
        assert!(storage.base_path().is_dir());

        storage.upload(LOGO_KEY, b"first".to_vec()).await.unwrap();
        storage.upload(LOGO_KEY, b"second".to_vec()).await.unwrap();

        let stored = fs::read(storage.base_path().join(LOGO_KEY)).await.unwrap();
        assert_eq!(stored, b"second");
    }
}
