//! # Client Configuration
//!
//! Configuration management for the deckgen-client library and CLI.
//! Supports environment variables, config files, and command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Client configuration for API connections and CLI behavior
///
/// # Examples
///
/// ```rust
/// use deckgen_client::config::ClientConfig;
///
/// // Default configuration
/// let config = ClientConfig::default();
/// assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
/// assert_eq!(config.polling.interval_secs, 3);
/// ```
///
/// ```rust,no_run
/// use deckgen_client::config::ClientConfig;
///
/// // Load configuration from environment and config files
/// let config = ClientConfig::load().expect("Failed to load config");
/// println!("API URL: {}", config.api.base_url);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Deckgen API connection settings
    pub api: ApiConfig,
    /// Async operation polling settings
    pub polling: PollingConfig,
    /// CLI-specific settings
    pub cli: CliConfig,
}

/// API endpoint configuration
///
/// The API key scopes every request to one organization; there is no
/// separate organization setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the API, including any path prefix
    /// (e.g., "<https://api.deckgen.example.com/api/v1>")
    pub base_url: String,
    /// API key sent with every authenticated request
    pub api_key: String,
    /// Header name carrying the API key
    pub api_key_header: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Polling behavior for asynchronous operations (analysis, deck generation)
///
/// Worst-case client-side wait is bounded by `interval_secs * max_attempts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between status checks
    pub interval_secs: u64,
    /// Maximum status checks before giving up with a timeout
    pub max_attempts: u32,
}

/// CLI-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Enable colored output
    pub colored_output: bool,
    /// Verbose logging level
    pub verbose_level: u8,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api/v1".to_string(),
                api_key: String::new(),
                api_key_header: "X-API-Key".to_string(),
                timeout_ms: 30000,
            },
            polling: PollingConfig {
                interval_secs: 3,
                max_attempts: 60,
            },
            cli: CliConfig {
                colored_output: true,
                verbose_level: 0,
            },
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (~/.deckgen/config.toml)
    /// 3. Default values
    pub fn load() -> ClientResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(config_path) = Self::find_config_file() {
            debug!("Loading config from: {}", config_path.display());
            match Self::load_from_file(&config_path) {
                Ok(file_config) => config = file_config,
                Err(e) => {
                    debug!("Failed to load config file: {}", e);
                    // Continue with defaults if config file fails
                }
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        debug!("Loaded client configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ClientError::config_error(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let possible_paths = [
            // Current directory
            Path::new("./deckgen-client.toml"),
            Path::new("./config/deckgen-client.toml"),
            // User home directory
            &dirs::home_dir()?.join(".deckgen").join("config.toml"),
            &dirs::config_dir()?.join("deckgen").join("client.toml"),
        ];

        for path in &possible_paths {
            if path.exists() && path.is_file() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DECKGEN_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(key) = std::env::var("DECKGEN_API_KEY") {
            self.api.api_key = key;
        }
        if let Ok(header) = std::env::var("DECKGEN_API_KEY_HEADER") {
            self.api.api_key_header = header;
        }
        if let Ok(timeout) = std::env::var("DECKGEN_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout.parse() {
                self.api.timeout_ms = timeout_ms;
            }
        }

        if let Ok(interval) = std::env::var("DECKGEN_POLL_INTERVAL_SECS") {
            if let Ok(interval_secs) = interval.parse() {
                self.polling.interval_secs = interval_secs;
            }
        }
        if let Ok(attempts) = std::env::var("DECKGEN_POLL_MAX_ATTEMPTS") {
            if let Ok(max_attempts) = attempts.parse() {
                self.polling.max_attempts = max_attempts;
            }
        }

        if let Ok(colored) = std::env::var("DECKGEN_CLI_COLORED") {
            self.cli.colored_output = colored.parse().unwrap_or(true);
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ClientError::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ClientError::config_error(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get default config file path
    pub fn default_config_path() -> ClientResult<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| ClientError::config_error("Could not determine home directory"))?;

        Ok(home_dir.join(".deckgen").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.api.api_key_header, "X-API-Key");
        assert!(config.api.api_key.is_empty());
        assert_eq!(config.polling.interval_secs, 3);
        assert_eq!(config.polling.max_attempts, 60);
    }

    #[test]
    fn test_config_serialization() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: ClientConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.api.base_url, deserialized.api.base_url);
        assert_eq!(config.polling.max_attempts, deserialized.polling.max_attempts);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test-config.toml");

        let mut original_config = ClientConfig::default();
        original_config.api.api_key = "key_live_1234".to_string();
        original_config.save_to_file(&config_path).unwrap();

        let loaded_config = ClientConfig::load_from_file(&config_path).unwrap();
        assert_eq!(original_config.api.base_url, loaded_config.api.base_url);
        assert_eq!(loaded_config.api.api_key, "key_live_1234");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = ClientConfig::load_from_file(&temp_dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
