//! Service implementations
//!
//! Store implementations of the `TuitionStore` trait

pub mod file_store;
pub mod memory_store;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use file_store::JsonFileTuitionStore;
pub use memory_store::InMemoryTuitionStore;
