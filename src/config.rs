use std::path::PathBuf;

use crate::error::ConfigError;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted store project.
    pub store_url: String,
    /// Anonymous API key for the store.
    pub store_api_key: String,
    /// Path to the GeoJSON boundary document.
    pub boundaries_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    /// STORE_URL and STORE_API_KEY are required;
    /// BOUNDARIES_PATH defaults to "2025.geojson".
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url =
            std::env::var("STORE_URL").map_err(|_| ConfigError::Missing("STORE_URL"))?;

        reqwest::Url::parse(&store_url)
            .map_err(|_| ConfigError::Invalid("STORE_URL", "must be a valid URL"))?;

        let store_api_key =
            std::env::var("STORE_API_KEY").map_err(|_| ConfigError::Missing("STORE_API_KEY"))?;
        if store_api_key.is_empty() {
            return Err(ConfigError::Invalid("STORE_API_KEY", "must not be empty"));
        }

        let boundaries_path = std::env::var("BOUNDARIES_PATH")
            .unwrap_or_else(|_| "2025.geojson".to_string())
            .into();

        Ok(Config {
            store_url,
            store_api_key,
            boundaries_path,
        })
    }
}
