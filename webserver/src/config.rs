//! Command line and environment configuration
//!
//! Every flag can also be set through a `TUITION_*` environment variable,
//! and a `.env` file in the working directory is loaded before parsing.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use registry::{AllocatorConfig, RegistryConfig};

use crate::error::{WebServerError, WebServerResult};

/// Which store backs the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Volatile, lost on restart
    Memory,
    /// JSON file at `--data-file`
    File,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tuition-webserver")]
#[command(about = "HTTP API for posting tuitions and allocating tuition codes")]
pub struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, env = "TUITION_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the HTTP server
    #[arg(long, env = "TUITION_PORT", default_value = "8080")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TUITION_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Storage backend
    #[arg(long, env = "TUITION_STORE", value_enum, default_value_t = StoreBackend::Memory)]
    pub store: StoreBackend,

    /// Data file used by the file backend
    #[arg(long, env = "TUITION_DATA_FILE", default_value = "./data/tuitions.json")]
    pub data_file: PathBuf,

    /// First code number of the gap-fill pass
    #[arg(long, env = "TUITION_GAP_FILL_START", default_value_t = 110)]
    pub gap_fill_start: u32,

    /// End (exclusive) of the gap-fill pass; the sequential pass starts here
    #[arg(long, env = "TUITION_GAP_FILL_END", default_value_t = 150)]
    pub gap_fill_end: u32,

    /// Last code number (inclusive) before falling back to timestamp codes
    #[arg(long, env = "TUITION_SEQUENCE_END", default_value_t = 2000)]
    pub sequence_end: u32,

    /// Code allocations tried when inserts hit duplicate codes
    #[arg(long, env = "TUITION_MAX_INSERT_ATTEMPTS", default_value_t = 3)]
    pub max_insert_attempts: u32,
}

impl Args {
    pub fn bind_address(&self) -> WebServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))
    }

    pub fn registry_config(&self) -> WebServerResult<RegistryConfig> {
        let allocator =
            AllocatorConfig::new(self.gap_fill_start, self.gap_fill_end, self.sequence_end)?;
        let config = RegistryConfig {
            allocator,
            max_insert_attempts: self.max_insert_attempts,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["tuition-webserver"]);

        assert_eq!(args.store, StoreBackend::Memory);
        assert_eq!(args.bind_address().unwrap(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(args.registry_config().unwrap(), RegistryConfig::default());
    }

    #[test]
    fn test_file_backend_and_ranges() {
        let args = Args::parse_from([
            "tuition-webserver",
            "--store",
            "file",
            "--data-file",
            "/tmp/t.json",
            "--gap-fill-start",
            "1",
            "--gap-fill-end",
            "10",
            "--sequence-end",
            "99",
        ]);

        assert_eq!(args.store, StoreBackend::File);
        let config = args.registry_config().unwrap();
        assert_eq!(config.allocator.gap_fill_range(), 1..10);
        assert_eq!(config.allocator.sequential_range(), 10..=99);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let args = Args::parse_from(["tuition-webserver", "--gap-fill-end", "5000"]);
        assert!(args.registry_config().is_err());
    }

    #[test]
    fn test_invalid_host_rejected() {
        let args = Args::parse_from(["tuition-webserver", "--host", "not a host"]);
        assert!(args.bind_address().is_err());
    }
}
