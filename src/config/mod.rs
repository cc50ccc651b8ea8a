//! Configuration loading and management
//!
//! ragdesk is configured entirely from the environment; there is no config
//! file. The resolved [`Config`] is built once at startup and injected into
//! the client, the repository and the panels.

use std::path::PathBuf;

/// Default base URL of the KNet service when `KN_ENDPOINT` is unset
pub const DEFAULT_KNET_ENDPOINT: &str = "http://127.0.0.1:8081";

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the KNet service (pipeline listing and feedback ingestion)
    pub knet_endpoint: String,

    /// Path of the SQLite database holding issue reports
    pub db_path: PathBuf,
}

impl Config {
    /// Build the configuration from the environment.
    ///
    /// `KN_ENDPOINT` selects the KNet base URL; everything else uses the
    /// defaults below.
    pub fn from_env() -> Self {
        let knet_endpoint = std::env::var("KN_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_KNET_ENDPOINT.to_string());

        Self {
            knet_endpoint,
            db_path: Self::data_dir().join("reports.db"),
        }
    }

    /// Get the per-user data directory path (~/.ragdesk/)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ragdesk")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knet_endpoint: DEFAULT_KNET_ENDPOINT.to_string(),
            db_path: Self::data_dir().join("reports.db"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_local() {
        let config = Config::default();
        assert_eq!(config.knet_endpoint, "http://127.0.0.1:8081");
        assert!(config.db_path.ends_with("reports.db"));
    }
}
