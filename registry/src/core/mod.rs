//! Core business logic modules
//!
//! Allocation logic only talks to the store through the `TuitionStore` trait

pub mod allocator;
pub mod config;

// Re-export commonly used types
pub use allocator::{Allocation, AllocationSource, CodeAllocator};
pub use config::{AllocatorConfig, RegistryConfig};
