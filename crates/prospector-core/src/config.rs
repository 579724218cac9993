//! Configuration management for Prospector.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Credentials are never read from or
//! written to the TOML file; they only come from the environment.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the OAuth client id.
pub const ENV_CLIENT_ID: &str = "PROSPECTOR_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "PROSPECTOR_CLIENT_SECRET";
/// Environment variable holding the LinkedIn login email.
pub const ENV_EMAIL: &str = "PROSPECTOR_LINKEDIN_EMAIL";
/// Environment variable holding the LinkedIn login password.
pub const ENV_PASSWORD: &str = "PROSPECTOR_LINKEDIN_PASSWORD";
/// Environment variable overriding browser headless mode.
pub const ENV_HEADLESS: &str = "PROSPECTOR_HEADLESS";
/// Environment variable overriding the cookie file location.
pub const ENV_COOKIES_FILE: &str = "PROSPECTOR_COOKIES_FILE";

/// Main application configuration.
///
/// This is loaded from `~/.config/prospector/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// LinkedIn API and account settings
    pub linkedin: LinkedInConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Cookie and diagnostic file settings
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// When `path` is `None` the default XDG location is used.
    ///
    /// Supports the following environment variables:
    /// - `PROSPECTOR_HEADLESS`: Override browser headless mode (true/false)
    /// - `PROSPECTOR_CLIENT_ID`: Override the OAuth client id
    /// - `PROSPECTOR_COOKIES_FILE`: Override the cookie file location
    /// - `PROSPECTOR_CLIENT_SECRET`, `PROSPECTOR_LINKEDIN_EMAIL`,
    ///   `PROSPECTOR_LINKEDIN_PASSWORD`: secrets, never stored on disk
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides using `lookup` as the variable source.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_HEADLESS) {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup(ENV_CLIENT_ID) {
            tracing::debug!("Override linkedin.client_id from env");
            self.linkedin.client_id = Some(val);
        }

        if let Some(val) = lookup(ENV_COOKIES_FILE) {
            tracing::debug!("Override session.cookies_file from env: {}", val);
            self.session.cookies_file = PathBuf::from(val);
        }

        if let Some(val) = lookup(ENV_CLIENT_SECRET) {
            self.linkedin.client_secret = Some(val);
        }
        if let Some(val) = lookup(ENV_EMAIL) {
            self.linkedin.email = Some(val);
        }
        if let Some(val) = lookup(ENV_PASSWORD) {
            self.linkedin.password = Some(val);
        }
    }

    /// Check value constraints that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "browser.window_width/window_height".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.linkedin.api_fields.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "linkedin.api_fields".to_string(),
                reason: "at least one field is required".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the default location.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML. Secrets are never included.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/prospector/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/prospector`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs = project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "prospector", "prospector")
}

/// LinkedIn API endpoints and account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInConfig {
    /// Base URL of the REST API
    pub api_base_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Profile fields requested from the people lookup
    pub api_fields: Vec<String>,
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret (environment only)
    #[serde(skip)]
    pub client_secret: Option<String>,
    /// Account email used for browser login (environment only)
    #[serde(skip)]
    pub email: Option<String>,
    /// Account password used for browser login (environment only)
    #[serde(skip)]
    pub password: Option<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.linkedin.com".to_string(),
            token_url: "https://www.linkedin.com/oauth/v2/accessToken".to_string(),
            api_fields: [
                "id",
                "first-name",
                "last-name",
                "headline",
                "location",
                "industry",
                "summary",
                "num-connections",
                "positions",
                "public-profile-url",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            client_id: None,
            client_secret: None,
            email: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// How long extractors wait for a page landmark, in milliseconds
    pub selector_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            selector_timeout_ms: 30_000,
        }
    }
}

/// Cookie persistence, login waits and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the browser cookie jar between runs
    pub cookies_file: PathBuf,
    /// Screenshot written when company extraction fails
    pub error_screenshot: PathBuf,
    /// How long to wait for the login form after clicking "Sign in"
    pub login_form_timeout_ms: u64,
    /// Fixed settle delay before typing credentials
    pub login_settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let cookies_file = project_dirs().map_or_else(
            || PathBuf::from("cookies.json"),
            |dirs| dirs.data_dir().join("cookies.json"),
        );

        Self {
            cookies_file,
            error_screenshot: PathBuf::from("error.png"),
            login_form_timeout_ms: 2000,
            login_settle_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.linkedin.api_base_url, "https://api.linkedin.com");
        assert!(config.linkedin.api_fields.contains(&"positions".to_string()));
        assert!(config.browser.headless);
        assert_eq!(config.session.error_screenshot, PathBuf::from("error.png"));
        assert_eq!(config.session.login_form_timeout_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_secrets_not_serialized() {
        let mut config = AppConfig::default();
        config.linkedin.client_secret = Some("s3cret".to_string());
        config.linkedin.password = Some("hunter2".to_string());

        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        assert!(toml_str.contains("[linkedin]"));
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[session]"));
        assert!(!toml_str.contains("s3cret"));
        assert!(!toml_str.contains("hunter2"));
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.browser.headless = false;
        config.linkedin.client_id = Some("client-123".to_string());
        config.save_to(&config_path).expect("save config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert!(!loaded.browser.headless);
        assert_eq!(loaded.linkedin.client_id.as_deref(), Some("client-123"));
        assert!(loaded.linkedin.client_secret.is_none());
    }

    #[test]
    fn test_load_from_missing_path() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = AppConfig::load_from(&tmp.path().join("absent.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_HEADLESS, "false"),
            (ENV_CLIENT_ID, "abc"),
            (ENV_CLIENT_SECRET, "xyz"),
            (ENV_EMAIL, "someone@example.com"),
            (ENV_PASSWORD, "pw"),
            (ENV_COOKIES_FILE, "/tmp/jar.json"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(ToString::to_string));

        assert!(!config.browser.headless);
        assert_eq!(config.linkedin.client_id.as_deref(), Some("abc"));
        assert_eq!(config.linkedin.client_secret.as_deref(), Some("xyz"));
        assert_eq!(config.linkedin.email.as_deref(), Some("someone@example.com"));
        assert_eq!(config.linkedin.password.as_deref(), Some("pw"));
        assert_eq!(config.session.cookies_file, PathBuf::from("/tmp/jar.json"));
    }

    #[test]
    fn test_invalid_headless_value_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| (key == ENV_HEADLESS).then(|| "maybe".to_string()));
        assert!(config.browser.headless);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[browser]
headless = false

[session]
error_screenshot = "/var/tmp/failure.png"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert!(!config.browser.headless);
        assert_eq!(
            config.session.error_screenshot,
            PathBuf::from("/var/tmp/failure.png")
        );
        // These should be defaults
        assert_eq!(config.browser.window_width, 1920);
        assert_eq!(config.session.login_settle_ms, 2000);
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = AppConfig::default();
        config.browser.window_width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
