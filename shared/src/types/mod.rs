//! Core types used throughout the tuition registry

pub mod code;
pub mod service;
pub mod tuition;

pub use code::{normalize_code, TuitionCode, CODE_PREFIX};
pub use service::ServiceId;
pub use tuition::{NewTuition, Tuition, TuitionStatus};
