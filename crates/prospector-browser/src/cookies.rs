//! Cookie jar persistence between browser runs.
//!
//! The jar is a JSON array of [`StoredCookie`] written after each successful
//! login and applied to every page the launcher opens, so most runs skip
//! the login form entirely.

use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A browser cookie in its on-disk form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// Unix timestamp in seconds, `-1` for session cookies
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

fn default_path() -> String {
    "/".to_string()
}

fn session_expiry() -> f64 {
    -1.0
}

impl StoredCookie {
    /// Whether the cookie carries a persistent expiry.
    pub fn is_persistent(&self) -> bool {
        self.expires > 0.0
    }
}

/// File-backed cookie jar.
#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the jar. A missing file is an empty jar.
    pub fn load(&self) -> Result<Vec<StoredCookie>> {
        if !self.path.exists() {
            tracing::debug!("No cookie file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let cookies: Vec<StoredCookie> = serde_json::from_str(&content).map_err(|e| {
            BrowserError::CookieStore(format!("{}: {e}", self.path.display()))
        })?;

        tracing::debug!(
            "Loaded {} cookies from {}",
            cookies.len(),
            self.path.display()
        );
        Ok(cookies)
    }

    /// Replace the jar with `cookies`, creating parent directories.
    pub fn save(&self, cookies: &[StoredCookie]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(cookies)?;
        fs::write(&self.path, content)?;

        tracing::debug!("Saved {} cookies to {}", cookies.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cookie(name: &str, expires: f64) -> StoredCookie {
        StoredCookie {
            name: name.to_string(),
            value: "v".to_string(),
            domain: ".linkedin.com".to_string(),
            path: "/".to_string(),
            expires,
            http_only: true,
            secure: true,
        }
    }

    #[test]
    fn test_missing_file_is_empty_jar() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = CookieStore::new(tmp.path().join("cookies.json"));
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = CookieStore::new(tmp.path().join("state").join("cookies.json"));

        let jar = vec![cookie("li_at", 1_900_000_000.0), cookie("lang", -1.0)];
        store.save(&jar).expect("save");

        let loaded = store.load().expect("load");
        assert_eq!(loaded, jar);
        assert!(loaded[0].is_persistent());
        assert!(!loaded[1].is_persistent());
    }

    #[test]
    fn test_minimal_entries_get_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("cookies.json");
        fs::write(
            &path,
            r#"[{"name":"JSESSIONID","value":"ajax:1","domain":"www.linkedin.com"}]"#,
        )
        .expect("write jar");

        let loaded = CookieStore::new(&path).load().expect("load");
        assert_eq!(loaded[0].path, "/");
        assert!(!loaded[0].is_persistent());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("cookies.json");
        fs::write(&path, "{not json").expect("write jar");

        let err = CookieStore::new(&path).load().expect_err("should fail");
        assert!(matches!(err, BrowserError::CookieStore(_)));
    }
}
