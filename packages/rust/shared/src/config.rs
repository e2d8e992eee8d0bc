//! Application configuration for keywordlens.
//!
//! User config lives at `~/.keywordlens/keywordlens.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KeywordLensError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "keywordlens.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".keywordlens";

// ---------------------------------------------------------------------------
// Config structs (matching keywordlens.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Stop-word list adjustments.
    #[serde(default)]
    pub stop_words: StopWordsConfig,

    /// Taxonomy overrides. Empty lists keep the built-in taxonomies.
    #[serde(default)]
    pub taxonomies: TaxonomiesConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory holding the context documents.
    #[serde(default = "default_context_dir")]
    pub context_dir: String,

    /// Where the keyword directory JSON is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// How many top keywords the CLI prints after a build.
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            context_dir: default_context_dir(),
            output_path: default_output_path(),
            top_keywords: default_top_keywords(),
        }
    }
}

fn default_context_dir() -> String {
    "context".into()
}
fn default_output_path() -> String {
    "data/enhanced_keyword_directory.json".into()
}
fn default_top_keywords() -> usize {
    20
}

/// `[stop_words]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopWordsConfig {
    /// Words appended to the built-in English stop-word list.
    #[serde(default)]
    pub extra: Vec<String>,
}

/// `[taxonomies]` section.
///
/// Entries are kept as ordered arrays of tables so that declaration order,
/// which decides classifier ties, survives the TOML round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomiesConfig {
    /// Replacement for the built-in business-type taxonomy.
    #[serde(default)]
    pub business: Vec<TaxonomyEntry>,

    /// Replacement for the built-in content-type taxonomy.
    #[serde(default)]
    pub content: Vec<TaxonomyEntry>,
}

/// `[[taxonomies.*]]` entry: one category and its detection patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Category label reported by the classifier.
    pub name: String,
    /// Regular expressions, matched case-insensitively.
    pub patterns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.keywordlens/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| KeywordLensError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.keywordlens/keywordlens.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| KeywordLensError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        KeywordLensError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_taxonomies(&config.taxonomies)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| KeywordLensError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| KeywordLensError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| KeywordLensError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject taxonomy entries that could never produce a classification.
fn validate_taxonomies(taxonomies: &TaxonomiesConfig) -> Result<()> {
    let entries = taxonomies.business.iter().chain(taxonomies.content.iter());
    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(KeywordLensError::config("taxonomy entry with empty name"));
        }
        if entry.patterns.is_empty() {
            return Err(KeywordLensError::config(format!(
                "taxonomy category '{}' has no patterns",
                entry.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("context_dir"));
        assert!(toml_str.contains("enhanced_keyword_directory.json"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.top_keywords, 20);
        assert_eq!(parsed.defaults.context_dir, "context");
        assert!(parsed.taxonomies.business.is_empty());
    }

    #[test]
    fn config_with_taxonomy_overrides_keeps_order() {
        let toml_str = r#"
[defaults]
context_dir = "/tmp/context"

[stop_words]
extra = ["blog"]

[[taxonomies.business]]
name = "Nonprofit"
patterns = ["donat|volunteer|charity"]

[[taxonomies.business]]
name = "Education"
patterns = ["school|course", "student"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.context_dir, "/tmp/context");
        assert_eq!(config.defaults.top_keywords, 20);
        assert_eq!(config.stop_words.extra, vec!["blog".to_string()]);
        assert_eq!(config.taxonomies.business.len(), 2);
        assert_eq!(config.taxonomies.business[0].name, "Nonprofit");
        assert_eq!(config.taxonomies.business[1].patterns.len(), 2);
        assert!(config.taxonomies.content.is_empty());
    }

    #[test]
    fn empty_pattern_list_is_rejected() {
        let taxonomies = TaxonomiesConfig {
            business: vec![TaxonomyEntry {
                name: "Empty".into(),
                patterns: vec![],
            }],
            content: vec![],
        };
        let err = validate_taxonomies(&taxonomies).unwrap_err();
        assert!(err.to_string().contains("has no patterns"));
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("keywordlens-does-not-exist/keywordlens.toml");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, KeywordLensError::Io { .. }));
    }
}
