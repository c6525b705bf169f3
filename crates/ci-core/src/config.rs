//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `contactsinteraction.toml`
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the TOML file is replaced by the variable's value.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Default configuration file name
pub const CONFIG_FILE: &str = "contactsinteraction.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub l10n: L10nConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application id the address book is registered under
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L10nConfig {
    /// Language code for user-visible strings
    #[serde(default = "default_language")]
    pub language: String,

    /// Optional TOML catalog replacing the built-in one
    #[serde(default)]
    pub catalog_path: Option<String>,
}

impl Default for L10nConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            catalog_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Whether the periodic cleanup runs in daemon mode
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,

    /// Cron expression (seconds field first)
    #[serde(default = "default_cleanup_cron")]
    pub cron: String,

    /// Records untouched for longer than this are removed
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_cleanup_enabled(),
            cron: default_cleanup_cron(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_app_id() -> String {
    crate::APP_ID.to_string()
}

fn default_db_path() -> String {
    "data/contactsinteraction.db".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_cron() -> String {
    "0 0 3 * * *".to_string()
}

fn default_retention_days() -> u32 {
    7
}

impl Config {
    /// Replace `${VAR_NAME}` with the variable's value.
    ///
    /// Unset variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse configuration from TOML text, expanding variables first
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut cfg = Self::from_toml_str(&content)?;
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    /// Load from `./contactsinteraction.toml` when present, else from the environment
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> crate::Result<()> {
        if let Ok(app_id) = std::env::var("CI_APP_ID") {
            if !app_id.is_empty() {
                self.app.app_id = app_id;
            }
        }

        if let Ok(path) = std::env::var("CI_DB_PATH") {
            self.database.path = path;
        }

        if let Ok(language) = std::env::var("CI_LANGUAGE") {
            if !language.is_empty() {
                self.l10n.language = language;
            }
        }
        if let Ok(path) = std::env::var("CI_L10N_CATALOG") {
            self.l10n.catalog_path = Some(path);
        }

        if let Ok(enabled) = std::env::var("CI_CLEANUP_ENABLED") {
            self.cleanup.enabled = enabled.to_lowercase() != "false";
        }
        if let Ok(cron) = std::env::var("CI_CLEANUP_CRON") {
            if !cron.is_empty() {
                self.cleanup.cron = cron;
            }
        }
        if let Ok(days) = std::env::var("CI_CLEANUP_RETENTION_DAYS") {
            self.cleanup.retention_days = days.parse().map_err(|_| {
                Error::Config(format!("CI_CLEANUP_RETENTION_DAYS is not a number: {}", days))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that read CI_* overrides must not interleave with tests that set them
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.app.app_id, "contactsinteraction");
        assert_eq!(config.database.path, "data/contactsinteraction.db");
        assert_eq!(config.l10n.language, "en");
        assert!(config.l10n.catalog_path.is_none());
        assert!(config.cleanup.enabled);
        assert_eq!(config.cleanup.cron, "0 0 3 * * *");
        assert_eq!(config.cleanup.retention_days, 7);
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[app]
app_id = "recentcontacts"

[database]
path = "/var/lib/ci/recent.db"

[l10n]
language = "de"

[cleanup]
enabled = false
retention_days = 30
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.app.app_id, "recentcontacts");
        assert_eq!(config.database.path, "/var/lib/ci/recent.db");
        assert_eq!(config.l10n.language, "de");
        assert!(!config.cleanup.enabled);
        assert_eq!(config.cleanup.retention_days, 30);
        // unspecified keys keep their defaults
        assert_eq!(config.cleanup.cron, "0 0 3 * * *");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str("[l10n]\nlanguage = \"fr\"\n").unwrap();
        assert_eq!(config.l10n.language, "fr");
        assert_eq!(config.app.app_id, "contactsinteraction");
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml_str("[database\npath = 1");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("CI_CONFIG_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${CI_CONFIG_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${CI_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("CI_CONFIG_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        assert_eq!(Config::expand_env_vars("no_vars_here"), "no_vars_here");
        assert_eq!(Config::expand_env_vars("$HOME"), "$HOME");
    }

    #[test]
    fn test_from_toml_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[database]\npath = \"recent.db\"\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.database.path, "recent.db");
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_toml_file("/nonexistent/contactsinteraction.toml");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "[database]\npath = \"file.db\"\n\n[cleanup]\nretention_days = 3\n",
        )
        .unwrap();

        unsafe {
            std::env::set_var("CI_DB_PATH", "env.db");
        }
        let result = Config::from_toml_file(&path);
        unsafe {
            std::env::remove_var("CI_DB_PATH");
        }

        let config = result.unwrap();
        assert_eq!(config.database.path, "env.db");
        // keys without an override keep the file value
        assert_eq!(config.cleanup.retention_days, 3);
    }

    #[test]
    fn test_invalid_retention_override() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        unsafe {
            std::env::set_var("CI_CLEANUP_RETENTION_DAYS", "abc");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("CI_CLEANUP_RETENTION_DAYS");
        }

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
