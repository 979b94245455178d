use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{error::StoreError, types::Credential, warning};

/// Durable home of the single user credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credential, or `None` when nothing usable is stored.
    async fn load(&self) -> Result<Option<Credential>, StoreError>;

    async fn save(&self, credential: &Credential) -> Result<(), StoreError>;
}

/// Keeps the credential as one pretty-printed JSON file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_record(&self) -> Result<Option<Credential>, StoreError> {
        // Raw bytes, so a record that is not even UTF-8 counts as corrupt.
        let bytes = match async_fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let credential: Credential = serde_json::from_slice(&bytes)?;
        Ok(Some(credential))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, StoreError> {
        match self.read_record().await {
            Err(StoreError::CorruptState(e)) => {
                warning!(
                    "Invalid JSON in token file {}, deleting it. Err: {}",
                    self.path.display(),
                    e
                );
                match async_fs::remove_file(&self.path).await {
                    Ok(()) => Ok(None),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(StoreError::Io(e)),
                }
            }
            other => other,
        }
    }

    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// In-process store, handy for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
    saves: Mutex<usize>,
}

impl MemoryCredentialStore {
    pub fn new(credential: Option<Credential>) -> Self {
        Self {
            credential: Mutex::new(credential),
            saves: Mutex::new(0),
        }
    }

    pub async fn current(&self) -> Option<Credential> {
        self.credential.lock().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.credential.lock().await.clone())
    }

    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.credential.lock().await = Some(credential.clone());
        *self.saves.lock().await += 1;
        Ok(())
    }
}
