//! Service tests for the tuition stores
//!
//! Both stores are run through the same contract checks, plus the
//! persistence checks specific to the file store.

pub mod file_store;
