//! JSON file backed tuition store
//!
//! The whole collection is kept in memory and rewritten to disk after every
//! mutation. Writes go to a sibling temp file which is then renamed over the
//! data file, so a crash mid-write leaves the previous contents intact.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use shared::{
    service_debug, service_info, ServiceId, Tuition, TuitionCode, TuitionStatus,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::TuitionStore;

/// Tuition store persisted as a JSON array in a single file
pub struct JsonFileTuitionStore {
    path: PathBuf,
    tuitions: RwLock<HashMap<TuitionCode, Tuition>>,
}

impl JsonFileTuitionStore {
    /// Open the store at `path`, loading existing records if the file exists.
    ///
    /// Fails if the file holds two tuitions with the same code.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let mut tuitions = HashMap::new();
        if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            if !content.trim().is_empty() {
                let records: Vec<Tuition> = serde_json::from_str(&content)?;
                for tuition in records {
                    if tuitions.contains_key(&tuition.code) {
                        return Err(StoreError::DuplicateCode { code: tuition.code });
                    }
                    tuitions.insert(tuition.code.clone(), tuition);
                }
            }
        } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        service_info!(
            ServiceId::current(),
            path = %path.display(),
            count = tuitions.len(),
            "📁 Opened tuition store"
        );

        Ok(Self {
            path,
            tuitions: RwLock::new(tuitions),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tuitions.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn replace_with(&self, temp_path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(content).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(temp_path, &self.path).await
    }

    async fn persist(&self, tuitions: &HashMap<TuitionCode, Tuition>) -> StoreResult<()> {
        let mut records: Vec<&Tuition> = tuitions.values().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.code.cmp(&b.code)));
        let content = serde_json::to_vec_pretty(&records)?;

        let temp_path = self.temp_path();
        if let Err(e) = self.replace_with(&temp_path, &content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        service_debug!(
            ServiceId::current(),
            path = %self.path.display(),
            count = records.len(),
            "💾 Persisted tuition store"
        );
        Ok(())
    }
}

#[async_trait]
impl TuitionStore for JsonFileTuitionStore {
    async fn list_codes(&self) -> StoreResult<Vec<TuitionCode>> {
        Ok(self.tuitions.read().await.keys().cloned().collect())
    }

    async fn find_by_code(&self, code: &TuitionCode) -> StoreResult<Option<Tuition>> {
        Ok(self.tuitions.read().await.get(code).cloned())
    }

    async fn insert(&self, tuition: Tuition) -> StoreResult<Tuition> {
        let mut tuitions = self.tuitions.write().await;
        if tuitions.contains_key(&tuition.code) {
            return Err(StoreError::DuplicateCode { code: tuition.code });
        }

        let code = tuition.code.clone();
        tuitions.insert(code.clone(), tuition.clone());
        if let Err(e) = self.persist(&tuitions).await {
            tuitions.remove(&code);
            return Err(e);
        }
        Ok(tuition)
    }

    async fn list_tuitions(&self) -> StoreResult<Vec<Tuition>> {
        let mut tuitions: Vec<Tuition> = self.tuitions.read().await.values().cloned().collect();
        tuitions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.code.cmp(&b.code)));
        Ok(tuitions)
    }

    async fn update_status(
        &self,
        code: &TuitionCode,
        status: TuitionStatus,
    ) -> StoreResult<Option<Tuition>> {
        let mut tuitions = self.tuitions.write().await;
        let Some(tuition) = tuitions.get_mut(code) else {
            return Ok(None);
        };

        let previous = std::mem::replace(&mut tuition.status, status);
        let updated = tuition.clone();
        if let Err(e) = self.persist(&tuitions).await {
            if let Some(tuition) = tuitions.get_mut(code) {
                tuition.status = previous;
            }
            return Err(e);
        }
        Ok(Some(updated))
    }

    async fn delete_by_code(&self, code: &TuitionCode) -> StoreResult<bool> {
        let mut tuitions = self.tuitions.write().await;
        let Some(removed) = tuitions.remove(code) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&tuitions).await {
            tuitions.insert(code.clone(), removed);
            return Err(e);
        }
        Ok(true)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.tuitions.read().await.len())
    }
}
