//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use linktxt_core::credential::Credential;
use linktxt_vendor::{DEFAULT_BASE_URL, VendorConfig};

use crate::error::AppError;

/// Default cap on the request body of an upload: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime configuration of the API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Vendor API connection settings.
    pub vendor: VendorConfig,
    /// Key used for uploads that do not carry their own.
    pub fallback_credential: Option<Credential>,
    /// Directory served for any path no route matches.
    pub static_dir: Option<PathBuf>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let timeout = var("VENDOR_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    AppError::Config(format!("VENDOR_TIMEOUT_SECS must be whole seconds: {e}"))
                })
            })
            .transpose()?;
        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("MAX_UPLOAD_BYTES must be a byte count: {e}"))
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            host,
            port,
            vendor: VendorConfig {
                base_url: var("VENDOR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
                timeout,
            },
            // Blank values were filtered above, so construction cannot fail.
            fallback_credential: var("API_KEY").and_then(|key| Credential::new(key).ok()),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
            max_upload_bytes,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
