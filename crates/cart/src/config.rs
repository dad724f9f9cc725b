//! Cart storage configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CART_STORAGE_PATH` - Directory the file-backed blob store writes to
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Blob-store key the cart snapshot lives under
//!   (default: `@GoMarketplace:products`)

use std::path::PathBuf;

use thiserror::Error;

/// Key the mobile client has always persisted its cart under. Snapshots
/// written here stay readable across app versions.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory the file-backed blob store writes to.
    pub storage_path: PathBuf,
    /// Blob-store key the cart snapshot lives under.
    pub storage_key: String,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CART_STORAGE_PATH` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_path = get_required_env("CART_STORAGE_PATH")?.into();
        let storage_key = get_env_or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);

        Ok(Self {
            storage_path,
            storage_key,
        })
    }

    /// Configuration with an explicit storage path and the default
    /// snapshot key.
    #[must_use]
    pub fn with_path(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
