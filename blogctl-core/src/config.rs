//! Configuration loading
//!
//! Layered, later sources win:
//! - built-in defaults
//! - `~/.blogctl/config.toml` (or the file named by `BLOGCTL_CONFIG`)
//! - `BLOGCTL_DATABASE`, `BLOGCTL_USERNAME`, `BLOGCTL_PASSWORD`, `BLOGCTL_SECRET_KEY`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "default";
pub const DEFAULT_SECRET_KEY: &str = "development key";

const REDACTED: &str = "********";

/// Runtime configuration for the blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// The single account allowed to post
    pub username: String,
    pub password: String,
    /// Key used to sign session cookies
    pub secret_key: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            database: Self::home_dir().join("blog.db"),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}

impl BlogConfig {
    /// Load from the config file (if present) and the environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            BlogError::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BlogError::config(format!("invalid TOML: {}", e)))
    }

    /// Config file path: `BLOGCTL_CONFIG` or `~/.blogctl/config.toml`
    pub fn config_path() -> PathBuf {
        env::var("BLOGCTL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::home_dir().join("config.toml"))
    }

    fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".blogctl")
    }

    /// Apply `BLOGCTL_*` overrides from `lookup` (normally the process env).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database) = lookup("BLOGCTL_DATABASE") {
            self.database = PathBuf::from(database);
        }
        if let Some(username) = lookup("BLOGCTL_USERNAME") {
            self.username = username;
        }
        if let Some(password) = lookup("BLOGCTL_PASSWORD") {
            self.password = password;
        }
        if let Some(secret_key) = lookup("BLOGCTL_SECRET_KEY") {
            self.secret_key = secret_key;
        }
    }

    /// True when the shipped password or signing key is still in place.
    pub fn uses_default_secrets(&self) -> bool {
        self.password == DEFAULT_PASSWORD || self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Copy safe to print: password and secret key masked.
    pub fn redacted(&self) -> Self {
        Self {
            password: REDACTED.to_string(),
            secret_key: REDACTED.to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_development_settings() {
        let config = BlogConfig::default();
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "default");
        assert_eq!(config.secret_key, "development key");
        assert!(config.database.ends_with(".blogctl/blog.db"));
        assert!(config.uses_default_secrets());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = BlogConfig::from_toml_str(
            r#"
            database = "/srv/blog/blog.db"
            password = "hunter2"
            "#,
        )
        .unwrap();

        assert_eq!(config.database, PathBuf::from("/srv/blog/blog.db"));
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.username, "admin");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = BlogConfig::from_toml_str("database = [").unwrap_err();
        assert!(matches!(err, BlogError::Config { .. }));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BlogConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, BlogConfig::default());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "username = \"editor\"\n").unwrap();

        let config = BlogConfig::load_from(&path).unwrap();
        assert_eq!(config.username, "editor");
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("BLOGCTL_DATABASE", "/tmp/other.db"),
            ("BLOGCTL_SECRET_KEY", "s3cret"),
        ]
        .into_iter()
        .collect();

        let mut config = BlogConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.username, "admin");
    }

    #[test]
    fn redacted_masks_secrets() {
        let config = BlogConfig::default().redacted();
        assert_eq!(config.password, REDACTED);
        assert_eq!(config.secret_key, REDACTED);
        assert_eq!(config.username, "admin");
    }
}
