//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACCESS_TOKEN_FILE, COOKIE_FILE, DEFAULT_API_BASE_URL, DEFAULT_KEYCHAIN_SERVICE,
    DEFAULT_TIMEOUT_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Where the access token survives between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// Platform keychain (macOS Keychain, Windows Credential Manager, Secret
    /// Service).
    Keychain,
    /// Plain file under the data directory, owner-only permissions.
    #[default]
    File,
    /// Process memory only.
    Memory,
}

impl std::str::FromStr for TokenBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keychain" => Ok(Self::Keychain),
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown token backend '{other}'")),
        }
    }
}

/// Token and cookie persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: TokenBackend,
    /// Directory holding the token file and the session cookies. `None`
    /// resolves to `$HOME/.roster`.
    pub data_dir: Option<PathBuf>,
    pub keychain_service: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: TokenBackend::default(),
            data_dir: None,
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolved data directory.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        std::env::var_os("HOME")
            .map_or_else(|| PathBuf::from(".roster"), |home| PathBuf::from(home).join(".roster"))
    }

    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.resolved_data_dir().join(ACCESS_TOKEN_FILE)
    }

    #[must_use]
    pub fn cookie_path(&self) -> PathBuf {
        self.resolved_data_dir().join(COOKIE_FILE)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of the human readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.backend, TokenBackend::File);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"api": {"base_url": "https://roster.test/api"}}"#)
            .unwrap();
        assert_eq!(config.api.base_url, "https://roster.test/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.keychain_service, "roster");
    }

    #[test]
    fn token_backend_parses_case_insensitively() {
        assert_eq!("Keychain".parse::<TokenBackend>(), Ok(TokenBackend::Keychain));
        assert_eq!(" memory ".parse::<TokenBackend>(), Ok(TokenBackend::Memory));
        assert!("sqlite".parse::<TokenBackend>().is_err());
    }

    #[test]
    fn explicit_data_dir_drives_paths() {
        let storage =
            StorageConfig { data_dir: Some(PathBuf::from("/tmp/roster")), ..Default::default() };
        assert_eq!(storage.token_path(), PathBuf::from("/tmp/roster/access_token"));
        assert_eq!(storage.cookie_path(), PathBuf::from("/tmp/roster/cookies.json"));
    }
}
