//! Webserver library for the tuition registry
//!
//! Exposes tuition posting and the code allocator over a JSON HTTP API.

pub mod config;
pub mod error;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::{Args, StoreBackend};
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::WebServer;
