//! Configuration loading for tetoegend.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag, must exist)
//! 2. `~/.tetoegen/config.toml` (user)
//! 3. `/etc/tetoegen/config.toml` (system)
//! 4. built-in defaults
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.tetoegen/secrets.toml` (user, must be 0600)
//! 2. `/etc/tetoegen/secrets.toml` (system, must be 0600)
//! 3. `OPENAI_API_KEY` environment variable
//!
//! A missing API key is not an error: the gateway then serves fallbacks.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::gateway::{Gateway, Tetoegen};
use crate::providers::openai;
use crate::request::{DEFAULT_ANALYZE_MODEL, DEFAULT_TIPS_MODEL};
use crate::{Result, TetoegenError};

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: TipCacheConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000).
    #[serde(default = "default_address")]
    pub address: String,
    /// Largest accepted request body in bytes (default: 10 MiB).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Upstream model provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// OpenAI-compatible base URL (default: https://api.openai.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Vision model for classification.
    #[serde(default = "default_analyze_model")]
    pub analyze_model: String,
    /// Text model for development tips.
    #[serde(default = "default_tips_model")]
    pub tips_model: String,
    /// Per-request timeout in seconds. Unset means no client-side timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analyze_model: default_analyze_model(),
            tips_model: default_tips_model(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    openai::DEFAULT_BASE_URL.to_string()
}

fn default_analyze_model() -> String {
    DEFAULT_ANALYZE_MODEL.to_string()
}

fn default_tips_model() -> String {
    DEFAULT_TIPS_MODEL.to_string()
}

/// Tip cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TipCacheConfig {
    /// Cache model-generated tips per label (default: false).
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for TipCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_entries: default_cache_entries(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_entries() -> u64 {
    16
}

fn default_cache_ttl() -> u64 {
    3600
}

impl From<&TipCacheConfig> for CacheConfig {
    fn from(config: &TipCacheConfig) -> Self {
        CacheConfig::new()
            .max_entries(config.max_entries)
            .ttl(Duration::from_secs(config.ttl_secs))
    }
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub openai: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Falls back to defaults when no file exists, but an explicit path
    /// that doesn't exist is an error.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TetoegenError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            TetoegenError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(TetoegenError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".tetoegen").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/tetoegen/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Build the gateway described by this configuration.
    pub fn build_gateway(&self, secrets: &Secrets) -> Result<Gateway> {
        let mut builder = Tetoegen::builder()
            .base_url(&self.upstream.base_url)
            .analyze_model(&self.upstream.analyze_model)
            .tips_model(&self.upstream.tips_model);

        if let Some(key) = secrets.openai_api_key() {
            builder = builder.openai(key);
        }
        if let Some(secs) = self.upstream.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if self.cache.enabled {
            builder = builder.tip_cache((&self.cache).into());
        }

        builder.build()
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (the key may come from env).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".tetoegen").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/tetoegen/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load a secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            TetoegenError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            TetoegenError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            TetoegenError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            return Err(TetoegenError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// OpenAI API key from the secrets file, falling back to `OPENAI_API_KEY`.
    ///
    /// Blank values count as absent.
    pub fn openai_api_key(&self) -> Option<String> {
        let non_blank = |key: &String| !key.trim().is_empty();
        self.openai
            .as_ref()
            .map(|s| s.api_key.clone())
            .filter(non_blank)
            .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok().filter(non_blank))
    }
}
