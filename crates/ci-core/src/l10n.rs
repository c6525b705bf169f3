//! Localization of user-visible strings
//!
//! Catalogs are TOML documents with one table per language, mapping the
//! English source text to its translation:
//!
//! ```toml
//! [de]
//! "Recently contacted" = "Kürzlich kontaktiert"
//! ```

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::L10nConfig;
use crate::{Error, Result};

/// Catalog shipped with the crate
const BUILTIN_CATALOG: &str = r#"
[de]
"Recently contacted" = "Kürzlich kontaktiert"

[fr]
"Recently contacted" = "Contactés récemment"

[es]
"Recently contacted" = "Contactado recientemente"

[ja]
"Recently contacted" = "最近連絡した人"
"#;

/// Translation service
pub trait L10n: Send + Sync {
    /// Translate a source string, falling back to the input
    fn t(&self, text: &str) -> String;

    /// Language code this service translates into
    fn language(&self) -> &str;
}

/// Translations for a single language
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: String,
    messages: HashMap<String, String>,
}

impl Catalog {
    /// A catalog that returns every string unchanged
    pub fn identity(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            messages: HashMap::new(),
        }
    }

    /// The built-in catalog for a language
    pub fn builtin(language: &str) -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG, language)
    }

    /// Parse a TOML catalog and keep the table for `language`
    pub fn from_toml_str(content: &str, language: &str) -> Result<Self> {
        let mut tables: HashMap<String, HashMap<String, String>> = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse l10n catalog: {}", e)))?;

        let messages = match tables.remove(language) {
            Some(messages) => messages,
            None => {
                debug!(language, "No translations for language, using source strings");
                HashMap::new()
            }
        };

        Ok(Self {
            language: language.to_string(),
            messages,
        })
    }

    /// Read a TOML catalog from disk
    pub fn from_file<P: AsRef<Path>>(path: P, language: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content, language)
    }

    /// Build the catalog described by the configuration
    pub fn load(config: &L10nConfig) -> Result<Self> {
        match config.catalog_path {
            Some(ref path) => Self::from_file(path, &config.language),
            None => Self::builtin(&config.language),
        }
    }

    /// Number of translated strings
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl L10n for Catalog {
    fn t(&self, text: &str) -> String {
        match self.messages.get(text) {
            Some(translated) => translated.clone(),
            None => {
                if !self.messages.is_empty() {
                    warn!(language = %self.language, text, "Missing translation");
                }
                text.to_string()
            }
        }
    }

    fn language(&self) -> &str {
        &self.language
    }
}
