use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::error::Result;

/// Application configuration, derived from `Portal.toml` and `PORTAL_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    api_url: String,
    #[serde(default = "default_namespace")]
    storage_namespace: String,
    #[serde(default = "default_timeout")]
    request_timeout: u32,
}

fn default_namespace() -> String {
    "vote-storage".to_string()
}

fn default_timeout() -> u32 {
    30
}

impl Config {
    /// Load the config, merging the TOML file with environment overrides.
    pub fn load() -> Result<Self> {
        Ok(Figment::new()
            .merge(Toml::file("Portal.toml"))
            .merge(Env::prefixed("PORTAL_"))
            .extract()?)
    }

    /// Base URL of the election REST API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Key under which the session record is persisted.
    pub fn storage_namespace(&self) -> &str {
        &self.storage_namespace
    }

    /// Timeout applied to every outbound request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.into())
    }
}
