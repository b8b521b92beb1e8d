//! Webserver state management

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// Core webserver state
#[derive(Debug)]
pub struct WebServerState {
    pub bind_address: SocketAddr,
    pub is_running: AtomicBool,
    pub tuitions_created: AtomicU64,
    pub server_start_time: Instant,
}

impl WebServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            is_running: AtomicBool::new(false),
            tuitions_created: AtomicU64::new(0),
            server_start_time: Instant::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Count a tuition created through this server, returning the new total
    pub fn record_tuition_created(&self) -> u64 {
        self.tuitions_created.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get_tuitions_created(&self) -> u64 {
        self.tuitions_created.load(Ordering::Relaxed)
    }
}
