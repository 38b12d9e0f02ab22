use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_client_secret")]
    pub client_secret: String,

    // Endpoints; overridable by SPOTIFY_AUTH_BASE / SPOTIFY_API_BASE (useful for tests)
    #[serde(default = "default_auth_base")]
    pub auth_base: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Market code sent with track searches and recommendations.
    #[serde(default = "default_market")]
    pub market: String,

    #[serde(default)]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Directory for the CLI's daily-rotated log file. Stdout only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_client_id() -> String { env::var("SPOTIFY_CLIENT_ID").unwrap_or_default() }
fn default_client_secret() -> String { env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default() }
fn default_auth_base() -> String {
    env::var("SPOTIFY_AUTH_BASE").unwrap_or_else(|_| "https://accounts.spotify.com".into())
}
fn default_api_base() -> String {
    // include v1 path by default
    env::var("SPOTIFY_API_BASE").unwrap_or_else(|_| "https://api.spotify.com/v1".into())
}
fn default_market() -> String { "IN".into() }
fn default_cache_ttl() -> u64 { 600 }

impl Config {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_base: default_auth_base(),
            api_base: default_api_base(),
            market: default_market(),
            cache_enabled: false,
            cache_ttl_secs: default_cache_ttl(),
            log_dir: None,
        }
    }

    /// Credentials and endpoints taken from the environment only.
    pub fn from_env() -> Self {
        Self::new(default_client_id(), default_client_secret())
    }

    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&s)?;
        // An explicit empty string in the file still falls back to the environment.
        if cfg.client_id.is_empty() {
            cfg.client_id = default_client_id();
        }
        if cfg.client_secret.is_empty() {
            cfg.client_secret = default_client_secret();
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(CatalogError::validation("client_id and client_secret are required"));
        }
        for (name, base) in [("auth_base", &self.auth_base), ("api_base", &self.api_base)] {
            url::Url::parse(base)
                .map_err(|e| CatalogError::validation(format!("invalid {}: {}", name, e)))?;
        }
        if self.cache_ttl_secs == 0 {
            return Err(CatalogError::validation("cache_ttl_secs must be positive"));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_documented_defaults() {
        let cfg = Config::new("id", "secret");
        assert_eq!(cfg.market, "IN");
        assert_eq!(cfg.cache_ttl_secs, 600);
        assert!(!cfg.cache_enabled);
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let cfg = Config::new("", "secret");
        assert!(matches!(cfg.validate(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut cfg = Config::new("id", "secret");
        cfg.api_base = "not a url".into();
        assert!(matches!(cfg.validate(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_ttl() {
        let mut cfg = Config::new("id", "secret");
        cfg.cache_ttl_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
