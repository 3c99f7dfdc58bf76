//! Application configuration loaded from the environment (and `.env` if present).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TRADEIN_API_URL` | `http://127.0.0.1:8000/api` |
//! | `TRADEIN_STORAGE_DIR` | `<local data dir>/tradein-cart` |
//! | `TRADEIN_HTTP_TIMEOUT_SECS` | `10` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub storage_dir: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = lookup("TRADEIN_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let storage_dir = lookup("TRADEIN_STORAGE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_dir);

        let http_timeout = match lookup("TRADEIN_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: "TRADEIN_HTTP_TIMEOUT_SECS",
                    reason: format!("'{raw}': {e}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: "TRADEIN_HTTP_TIMEOUT_SECS",
                        reason: "must be at least 1".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        info!(
            api_base_url = %api_base_url,
            storage_dir = %storage_dir.display(),
            timeout_secs = http_timeout.as_secs(),
            "Configuration loaded"
        );

        Ok(Self {
            api_base_url,
            storage_dir,
            http_timeout,
        })
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("tradein-cart"))
        .unwrap_or_else(|| PathBuf::from(".tradein-cart"))
}
