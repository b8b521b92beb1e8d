use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global service ID singleton - set once at startup
static SERVICE_ID: OnceLock<ServiceId> = OnceLock::new();

/// Identifier for the component emitting log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceId {
    /// Registry library used without a hosting process
    Registry,
    /// HTTP server process
    WebServer,
}

impl ServiceId {
    /// Initialize the global service ID for the webserver
    pub fn init_webserver() -> &'static ServiceId {
        SERVICE_ID.get_or_init(|| ServiceId::WebServer)
    }

    /// Get the global service ID, defaulting to `Registry` when unset
    pub fn current() -> &'static ServiceId {
        SERVICE_ID.get_or_init(|| ServiceId::Registry)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::Registry => write!(f, "registry"),
            ServiceId::WebServer => write!(f, "webserver"),
        }
    }
}
