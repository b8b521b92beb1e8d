//! Tuition registry library
//!
//! Allocates human-readable `ST<number>` codes for posted tuitions and
//! persists them through a pluggable store. The store's duplicate-code
//! rejection is the final guard on uniqueness; the registry retries
//! allocation when it fires.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod tuition_registry;

// Re-export commonly used types
pub use core::{Allocation, AllocationSource, AllocatorConfig, CodeAllocator, RegistryConfig};
pub use error::{RegistryError, RegistryResult, StoreError, StoreResult};
pub use services::{InMemoryTuitionStore, JsonFileTuitionStore};
pub use traits::{MockTuitionStore, TuitionStore};
pub use tuition_registry::TuitionRegistry;
