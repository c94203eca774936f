//! Configuration with hierarchical layering.
//!
//! Priority, highest to lowest:
//!
//! 1. Environment variables (`ATRIUM_*`)
//! 2. Global config (`~/.atrium/config.toml`)
//! 3. Default values (compile-time)
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `ATRIUM_API_URL` | `api.base_url` | String |
//! | `ATRIUM_TOKEN` | `auth.token` | String |
//! | `ATRIUM_USER_ID` | `user.id` | String |
//! | `ATRIUM_USER_NAME` | `user.name` | String |
//! | `ATRIUM_USER_EMAIL` | `user.email` | String |
//! | `ATRIUM_STATE_DIR` | `paths.state_dir` | PathBuf |
//! | `ATRIUM_DEBUG` | `debug` | bool |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.atrium/config.toml
//! debug = false
//!
//! [api]
//! base_url = "https://api.example.com"
//!
//! [auth]
//! token = "eyJ..."
//!
//! [user]
//! id = "u-123"
//! name = "Ada"
//! email = "ada@example.com"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default global config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".atrium")
}

/// Default global config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        /// File that could not be parsed.
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar {
        /// Variable name.
        name: String,
        /// What was expected.
        message: String,
    },
}

impl ConfigError {
    fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// API endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the external API.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token; absent means signed out.
    pub token: Option<String>,
}

/// The signed-in user's identity fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Stable user id.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// Filesystem paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where persisted state (the selection record) lives. Defaults
    /// to the config directory.
    pub state_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Verbose diagnostics.
    pub debug: bool,
    /// API endpoint settings.
    pub api: ApiConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Signed-in user identity.
    pub user: UserConfig,
    /// Filesystem paths.
    pub paths: PathsConfig,
}

impl AppConfig {
    /// Parses a config from TOML.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// The effective state directory.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.paths
            .state_dir
            .clone()
            .unwrap_or_else(default_config_dir)
    }

    /// Merges another config over this one. Fields carrying their
    /// default value in `other` are left untouched.
    pub fn merge(&mut self, other: &Self) {
        if other.debug {
            self.debug = other.debug;
        }
        if other.api != ApiConfig::default() {
            self.api = other.api.clone();
        }
        if other.auth.token.is_some() {
            self.auth.token = other.auth.token.clone();
        }
        if other.user.id.is_some() {
            self.user.id = other.user.id.clone();
        }
        if other.user.name.is_some() {
            self.user.name = other.user.name.clone();
        }
        if other.user.email.is_some() {
            self.user.email = other.user.email.clone();
        }
        if other.paths.state_dir.is_some() {
            self.paths.state_dir = other.paths.state_dir.clone();
        }
    }
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use atrium_app::config::ConfigLoader;
///
/// # fn main() -> Result<(), atrium_app::config::ConfigError> {
/// let config = ConfigLoader::new()
///     .skip_env_vars() // for deterministic tests
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_config_path: Option<PathBuf>,
    skip_env: bool,
    skip_global: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be
    /// parsed, or an `ATRIUM_*` variable carries an invalid value.
    /// A missing config file is silently ignored.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);
            if let Some(global) = load_file(&global_path)? {
                debug!(path = %global_path.display(), "loaded global config");
                config.merge(&global);
            }
        }

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = AppConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    Ok(Some(config))
}

fn apply_env_vars(config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("ATRIUM_DEBUG") {
        config.debug = parse_bool(&val)
            .ok_or_else(|| ConfigError::invalid_env_var("ATRIUM_DEBUG", "expected bool"))?;
    }
    if let Ok(val) = std::env::var("ATRIUM_API_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("ATRIUM_TOKEN") {
        config.auth.token = Some(val);
    }
    if let Ok(val) = std::env::var("ATRIUM_USER_ID") {
        config.user.id = Some(val);
    }
    if let Ok(val) = std::env::var("ATRIUM_USER_NAME") {
        config.user.name = Some(val);
    }
    if let Ok(val) = std::env::var("ATRIUM_USER_EMAIL") {
        config.user.email = Some(val);
    }
    if let Ok(val) = std::env::var("ATRIUM_STATE_DIR") {
        config.paths.state_dir = Some(PathBuf::from(val));
    }
    Ok(())
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off"
/// (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_env_vars()
            .load()
            .unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn load_global_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
debug = true

[api]
base_url = "https://api.example.com"

[user]
email = "ada@example.com"
"#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_global_config(&path)
            .skip_env_vars()
            .load()
            .unwrap();

        assert!(config.debug);
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.user.email.as_deref(), Some("ada@example.com"));
        // Untouched sections keep their defaults.
        assert_eq!(config.auth.token, None);
    }

    #[test]
    fn missing_config_file_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .skip_env_vars()
            .load()
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_config_file_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "debug = not-a-bool").unwrap();

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_env_vars()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn merge_keeps_base_when_overlay_is_default() {
        let mut base = AppConfig {
            debug: true,
            ..AppConfig::default()
        };
        base.auth.token = Some("t".into());
        base.merge(&AppConfig::default());
        assert!(base.debug);
        assert_eq!(base.auth.token.as_deref(), Some("t"));
    }

    #[test]
    fn state_dir_defaults_to_config_dir() {
        let config = AppConfig::default();
        assert_eq!(config.state_dir(), default_config_dir());

        let mut custom = AppConfig::default();
        custom.paths.state_dir = Some(PathBuf::from("/tmp/atrium-state"));
        assert_eq!(custom.state_dir(), PathBuf::from("/tmp/atrium-state"));
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("invalid"), None);
    }
}
