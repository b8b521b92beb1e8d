//! Request handlers
//!
//! `api` serves tuition records, `codes` serves the code allocator

pub mod api;
pub mod codes;
