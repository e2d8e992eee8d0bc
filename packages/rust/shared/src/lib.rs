//! Shared types, error model, and configuration for keywordlens.
//!
//! This crate is the foundation depended on by all other keywordlens crates.
//! It provides:
//! - [`KeywordLensError`]: the unified error type
//! - Domain types ([`ClassificationResult`], [`KeywordCandidate`], [`RankedKeyword`],
//!   [`KeywordDirectory`], [`BusinessContext`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, StopWordsConfig, TaxonomiesConfig, TaxonomyEntry, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{KeywordLensError, Result};
pub use types::{
    BusinessContext, ClassificationResult, DirectorySummary, KeywordCandidate, KeywordCategory,
    KeywordDirectory, Priority, RankedKeyword, UNKNOWN_CATEGORY,
};
