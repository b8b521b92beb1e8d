//! Shared types for the tuition registry
//!
//! Contains the code and tuition record types used by both the registry
//! library and the webserver, plus the common logging setup.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;
