//! Core pipeline orchestration for keywordlens.
//!
//! This crate ties together context loading, keyword extraction, ranking,
//! and persistence into end-to-end workflows (e.g., `build_keyword_directory`).

pub mod analysis;
pub mod loader;
pub mod pipeline;

pub use analysis::AnalysisContext;
pub use loader::{ContextDocument, load_context_dir};
pub use pipeline::{
    BuildResult, KeywordDirectoryConfig, ProgressReporter, SilentProgress, analyze_path,
    build_keyword_directory, extract_all, load_keyword_directory, save_keyword_directory,
};
