//! In-memory tuition store

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use shared::{Tuition, TuitionCode, TuitionStatus};

use crate::error::{StoreError, StoreResult};
use crate::traits::TuitionStore;

/// Tuition store backed by a `HashMap` keyed on code
#[derive(Clone, Default)]
pub struct InMemoryTuitionStore {
    tuitions: Arc<RwLock<HashMap<TuitionCode, Tuition>>>,
}

impl InMemoryTuitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store already holding `tuitions`. Later duplicates are dropped.
    pub fn with_tuitions(tuitions: impl IntoIterator<Item = Tuition>) -> Self {
        let mut map = HashMap::new();
        for tuition in tuitions {
            map.entry(tuition.code.clone()).or_insert(tuition);
        }
        Self {
            tuitions: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl TuitionStore for InMemoryTuitionStore {
    async fn list_codes(&self) -> StoreResult<Vec<TuitionCode>> {
        Ok(self.tuitions.read().await.keys().cloned().collect())
    }

    async fn find_by_code(&self, code: &TuitionCode) -> StoreResult<Option<Tuition>> {
        Ok(self.tuitions.read().await.get(code).cloned())
    }

    async fn insert(&self, tuition: Tuition) -> StoreResult<Tuition> {
        let mut tuitions = self.tuitions.write().await;
        match tuitions.entry(tuition.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode { code: tuition.code }),
            Entry::Vacant(slot) => Ok(slot.insert(tuition).clone()),
        }
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
        Ok(tuitions.get_mut(code).map(|tuition| {
            tuition.status = status;
            tuition.clone()
        }))
    }

    async fn delete_by_code(&self, code: &TuitionCode) -> StoreResult<bool> {
        Ok(self.tuitions.write().await.remove(code).is_some())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.tuitions.read().await.len())
    }
}
