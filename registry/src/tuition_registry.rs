//! Tuition registry service
//!
//! Ties the code allocator to the store. Creating a tuition allocates a code
//! and inserts immediately; when the store rejects the insert as a duplicate
//! (another request took the same code in between) a fresh code is allocated,
//! up to `max_insert_attempts` times.

use std::sync::Arc;

use shared::{
    logging, normalize_code, service_info, service_warn, NewTuition, ServiceId, Tuition,
    TuitionCode, TuitionStatus,
};

use crate::core::{Allocation, CodeAllocator, RegistryConfig};
use crate::error::{RegistryError, RegistryResult, StoreError};
use crate::traits::TuitionStore;

/// Registry of posted tuitions with dependency-injected storage
pub struct TuitionRegistry<S: TuitionStore> {
    store: Arc<S>,
    allocator: CodeAllocator<S>,
    config: RegistryConfig,
}

impl<S: TuitionStore> Clone for TuitionRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            allocator: self.allocator.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: TuitionStore> TuitionRegistry<S> {
    /// Create a registry over `store`, validating the configuration
    pub fn new(store: Arc<S>, config: RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        let allocator = CodeAllocator::new(store.clone(), config.allocator.clone());
        Ok(Self {
            store,
            allocator,
            config,
        })
    }

    /// Create a registry with default ranges and retry count
    pub fn with_defaults(store: Arc<S>) -> Self {
        let config = RegistryConfig::default();
        let allocator = CodeAllocator::new(store.clone(), config.allocator.clone());
        Self {
            store,
            allocator,
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate and persist a new tuition.
    ///
    /// A requested code is used as-is (after normalization) and a clash is
    /// reported as [`RegistryError::CodeTaken`]. Otherwise a code is
    /// allocated and the insert retried on duplicate-code rejections.
    pub async fn create_tuition(&self, request: NewTuition) -> RegistryResult<Tuition> {
        request.validate()?;

        if let Some(raw) = request.requested_code.as_deref() {
            let code = TuitionCode::parse(raw)?;
            return self.insert_with_requested_code(code, request).await;
        }

        let max_attempts = self.config.max_insert_attempts;
        let mut tuition = Tuition::new(self.allocator.allocate_code().await, request);

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                tuition = tuition.with_code(self.allocator.allocate_code().await);
            }

            match self.store.insert(tuition.clone()).await {
                Ok(stored) => {
                    service_info!(
                        ServiceId::current(),
                        code = %stored.code,
                        attempt,
                        "📝 Tuition posted"
                    );
                    return Ok(stored);
                }
                Err(StoreError::DuplicateCode { code }) => {
                    service_warn!(
                        ServiceId::current(),
                        code = %code,
                        attempt,
                        max_attempts,
                        "Allocated code was taken before insert, reallocating"
                    );
                }
                Err(e) => {
                    logging::log_error(ServiceId::current(), "Tuition insert", &e);
                    return Err(e.into());
                }
            }
        }

        Err(RegistryError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    async fn insert_with_requested_code(
        &self,
        code: TuitionCode,
        request: NewTuition,
    ) -> RegistryResult<Tuition> {
        match self.store.insert(Tuition::new(code, request)).await {
            Ok(stored) => {
                service_info!(
                    ServiceId::current(),
                    code = %stored.code,
                    "📝 Tuition posted with requested code"
                );
                Ok(stored)
            }
            Err(StoreError::DuplicateCode { code }) => Err(RegistryError::CodeTaken { code }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_tuition(&self, code: &TuitionCode) -> RegistryResult<Tuition> {
        self.store
            .find_by_code(code)
            .await?
            .ok_or_else(|| RegistryError::NotFound { code: code.clone() })
    }

    pub async fn list_tuitions(&self) -> RegistryResult<Vec<Tuition>> {
        Ok(self.store.list_tuitions().await?)
    }

    /// Move a tuition to `status`. Any transition is allowed; the code stays
    /// reserved until the tuition is deleted.
    pub async fn update_status(
        &self,
        code: &TuitionCode,
        status: TuitionStatus,
    ) -> RegistryResult<Tuition> {
        let tuition = self
            .store
            .update_status(code, status)
            .await?
            .ok_or_else(|| RegistryError::NotFound { code: code.clone() })?;

        service_info!(
            ServiceId::current(),
            code = %code,
            status = ?status,
            "🔄 Tuition status updated"
        );
        Ok(tuition)
    }

    /// Delete a tuition. Its code becomes eligible for gap-filling again.
    pub async fn delete_tuition(&self, code: &TuitionCode) -> RegistryResult<()> {
        if self.store.delete_by_code(code).await? {
            service_info!(ServiceId::current(), code = %code, "🗑️ Tuition deleted");
            Ok(())
        } else {
            Err(RegistryError::NotFound { code: code.clone() })
        }
    }

    pub async fn count(&self) -> RegistryResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Code the allocator would hand out right now. Nothing is reserved.
    pub async fn preview_next_code(&self) -> Allocation {
        self.allocator.allocate().await
    }

    /// Whether `code` is free; `false` if the store cannot be reached
    pub async fn is_code_available(&self, code: &TuitionCode) -> bool {
        self.allocator.is_code_available(code).await
    }

    /// Prefix user input with `ST` unless already present
    pub fn normalize_code(&self, input: &str) -> String {
        normalize_code(input)
    }
}
