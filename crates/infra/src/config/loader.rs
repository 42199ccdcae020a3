//! Configuration loader
//!
//! Loads application configuration from a file (or the defaults) and then
//! applies environment overrides.
//!
//! ## Loading Strategy
//! 1. Use the first config file found by [`probe_config_paths`], or
//!    [`Config::default`] when there is none
//! 2. Apply `ROSTER_*` environment overrides
//! 3. Validate the result (the base URL must be absolute)
//!
//! ## Environment Variables
//! - `ROSTER_API_BASE_URL`: Backend base URL
//! - `ROSTER_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `ROSTER_USER_AGENT`: `User-Agent` header value
//! - `ROSTER_TOKEN_BACKEND`: `keychain`, `file` or `memory`
//! - `ROSTER_DATA_DIR`: Directory for the token file and session cookies
//! - `ROSTER_KEYCHAIN_SERVICE`: Keychain service name
//! - `ROSTER_LOG_LEVEL`: Default log filter
//! - `ROSTER_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./roster.toml` or `./roster.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use roster_domain::{Config, Result, RosterError};

const CONFIG_FILE_NAMES: [&str; 4] = ["roster.toml", "roster.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Reads the first config file found, falling back to the defaults, then
/// applies environment overrides.
///
/// # Errors
/// Returns `RosterError::Config` if:
/// - A config file exists but cannot be read or parsed
/// - An environment override has an invalid value
/// - The resulting base URL is not an absolute URL
pub fn load() -> Result<Config> {
    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No config file found, using defaults");
            load_from_env()
        }
    }
}

/// Load the defaults with environment overrides applied
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `RosterError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file, then apply environment overrides
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `RosterError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - An override or the resulting base URL is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RosterError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RosterError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RosterError::Config(format!("Failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `RosterError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RosterError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RosterError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RosterError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(base_url) = env_opt("ROSTER_API_BASE_URL") {
        config.api.base_url = base_url;
    }
    if let Some(timeout) = env_opt("ROSTER_API_TIMEOUT_SECS") {
        config.api.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| RosterError::Config(format!("Invalid timeout: {e}")))?;
    }
    if let Some(agent) = env_opt("ROSTER_USER_AGENT") {
        config.api.user_agent = Some(agent);
    }
    if let Some(backend) = env_opt("ROSTER_TOKEN_BACKEND") {
        config.storage.backend = backend.parse().map_err(RosterError::Config)?;
    }
    if let Some(dir) = env_opt("ROSTER_DATA_DIR") {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(service) = env_opt("ROSTER_KEYCHAIN_SERVICE") {
        config.storage.keychain_service = service;
    }
    if let Some(level) = env_opt("ROSTER_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("ROSTER_LOG_JSON", config.logging.json);
    Ok(())
}

/// Check values that serde cannot.
///
/// # Errors
/// Returns `RosterError::Config` for a relative or unparseable base URL or a
/// zero timeout.
pub fn validate(config: &Config) -> Result<()> {
    let url = url::Url::parse(&config.api.base_url).map_err(|e| {
        RosterError::Config(format!("Invalid API base URL '{}': {e}", config.api.base_url))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RosterError::Config(format!(
            "API base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(RosterError::Config("Request timeout must be at least 1 second".into()));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./roster.{toml,json}`,
///    `./config.{toml,json}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    // Return first existing candidate
    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.is_file())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Arguments
/// * `key` - Environment variable name
/// * `default` - Default value if variable is not set
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use roster_domain::TokenBackend;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ROSTER_VARS: [&str; 8] = [
        "ROSTER_API_BASE_URL",
        "ROSTER_API_TIMEOUT_SECS",
        "ROSTER_USER_AGENT",
        "ROSTER_TOKEN_BACKEND",
        "ROSTER_DATA_DIR",
        "ROSTER_KEYCHAIN_SERVICE",
        "ROSTER_LOG_LEVEL",
        "ROSTER_LOG_JSON",
    ];

    fn clear_roster_env() {
        for key in ROSTER_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for value in ["1", "true", "yes", "on", "TRUE"] {
            std::env::set_var("ROSTER_TEST_BOOL", value);
            assert!(env_bool("ROSTER_TEST_BOOL", false), "{value} should be true");
        }
        for value in ["0", "false", "no", "off"] {
            std::env::set_var("ROSTER_TEST_BOOL", value);
            assert!(!env_bool("ROSTER_TEST_BOOL", true), "{value} should be false");
        }

        // Test default when not set
        std::env::remove_var("ROSTER_TEST_BOOL");
        assert!(env_bool("ROSTER_TEST_BOOL", true));
        assert!(!env_bool("ROSTER_TEST_BOOL", false));
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_roster_env();

        let config = load_from_env().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_roster_env();

        std::env::set_var("ROSTER_API_BASE_URL", "https://roster.example.com/api");
        std::env::set_var("ROSTER_API_TIMEOUT_SECS", "5");
        std::env::set_var("ROSTER_USER_AGENT", "roster-test");
        std::env::set_var("ROSTER_TOKEN_BACKEND", "memory");
        std::env::set_var("ROSTER_DATA_DIR", "/tmp/roster-test");
        std::env::set_var("ROSTER_KEYCHAIN_SERVICE", "roster-test");
        std::env::set_var("ROSTER_LOG_LEVEL", "debug");
        std::env::set_var("ROSTER_LOG_JSON", "yes");

        let result = load_from_env();
        clear_roster_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://roster.example.com/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.user_agent.as_deref(), Some("roster-test"));
        assert_eq!(config.storage.backend, TokenBackend::Memory);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/roster-test")));
        assert_eq!(config.storage.keychain_service, "roster-test");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (key, value) in [
            ("ROSTER_API_TIMEOUT_SECS", "soon"),
            ("ROSTER_API_TIMEOUT_SECS", "0"),
            ("ROSTER_TOKEN_BACKEND", "vault"),
            ("ROSTER_API_BASE_URL", "localhost:8000"),
            ("ROSTER_API_BASE_URL", "/api"),
        ] {
            clear_roster_env();
            std::env::set_var(key, value);
            let result = load_from_env();
            assert!(matches!(result, Err(RosterError::Config(_))), "{key}={value}: {result:?}");
        }
        clear_roster_env();
    }

    #[test]
    fn test_load_from_file_toml_with_override() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_roster_env();

        let toml_content = r#"
            [api]
            base_url = "http://10.0.0.2:8000/api"
            timeout_secs = 10

            [storage]
            backend = "keychain"
        "#;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, toml_content).unwrap();

        std::env::set_var("ROSTER_API_TIMEOUT_SECS", "3");
        let result = load_from_file(Some(path));
        clear_roster_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:8000/api");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.storage.backend, TokenBackend::Keychain);
        assert_eq!(config.logging, roster_domain::LoggingConfig::default());
    }

    #[test]
    fn test_load_from_file_json() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_roster_env();

        let json_content = r#"{"api": {"base_url": "https://api.example.com"}, "logging": {"json": true}}"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert!(config.logging.json);
        assert_eq!(config.storage.backend, TokenBackend::File);
    }

    #[test]
    fn test_load_from_file_missing_and_unsupported() {
        let missing = load_from_file(Some(PathBuf::from("/nonexistent/roster.toml")));
        assert!(matches!(missing, Err(RosterError::Config(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.yaml");
        std::fs::write(&path, "api: {}").unwrap();
        assert!(matches!(load_from_file(Some(path)), Err(RosterError::Config(_))));
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let result = parse_config("[api\nbase_url = 1", Path::new("roster.toml"));
        assert!(matches!(result, Err(RosterError::Config(msg)) if msg.contains("TOML")));
    }
}
