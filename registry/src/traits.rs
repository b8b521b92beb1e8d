//! Trait definitions with mockall annotations for testing
//!
//! The tuition store is the only I/O seam of the registry. The allocator and
//! the registry service are generic over it so tests can inject faults.

use async_trait::async_trait;
use shared::{Tuition, TuitionCode, TuitionStatus};

use crate::error::StoreResult;

/// Persistence collaborator holding posted tuitions
///
/// Implementations must reject an insert whose code is already stored with
/// [`StoreError::DuplicateCode`](crate::error::StoreError::DuplicateCode).
/// That rejection is the final arbiter of code uniqueness; the allocator only
/// narrows the window in which two callers can pick the same code.
#[mockall::automock]
#[async_trait]
pub trait TuitionStore: Send + Sync {
    /// All codes currently stored, in no particular order
    async fn list_codes(&self) -> StoreResult<Vec<TuitionCode>>;

    /// Exact-match lookup by code
    async fn find_by_code(&self, code: &TuitionCode) -> StoreResult<Option<Tuition>>;

    /// Insert a new tuition, enforcing code uniqueness
    async fn insert(&self, tuition: Tuition) -> StoreResult<Tuition>;

    /// All stored tuitions, oldest first
    async fn list_tuitions(&self) -> StoreResult<Vec<Tuition>>;

    /// Set the status of a stored tuition, returning the updated record or
    /// `None` if no tuition has `code`
    async fn update_status(
        &self,
        code: &TuitionCode,
        status: TuitionStatus,
    ) -> StoreResult<Option<Tuition>>;

    /// Remove a tuition. Returns whether anything was removed.
    async fn delete_by_code(&self, code: &TuitionCode) -> StoreResult<bool>;

    /// Number of stored tuitions
    async fn count(&self) -> StoreResult<usize>;
}
