//! End-to-end keyword pipeline: context dir → extract → rank → keyword directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, instrument};

use keywordlens_keywords::{StopWords, extract_candidates, rank_keywords};
use keywordlens_shared::{BusinessContext, KeywordCandidate, KeywordDirectory, KeywordLensError, Result};

use crate::analysis::AnalysisContext;
use crate::loader::{ContextDocument, load_context_dir};

/// Configuration for the keyword-directory pipeline.
#[derive(Debug, Clone)]
pub struct KeywordDirectoryConfig {
    /// Directory holding the context documents.
    pub context_dir: PathBuf,
    /// Where the keyword directory JSON is written.
    pub output_path: PathBuf,
}

/// Result of the keyword-directory pipeline.
#[derive(Debug)]
pub struct BuildResult {
    /// The ranked directory that was written.
    pub directory: KeywordDirectory,
    /// Number of documents read from the context directory.
    pub documents: usize,
    /// Keyword candidates extracted before ranking.
    pub raw_candidates: usize,
    /// Path of the written directory file.
    pub output_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after keywords were extracted from a document.
    fn document_processed(&self, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_processed(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Run the full keyword pipeline.
///
/// 1. Load context documents
/// 2. Extract keyword candidates per document
/// 3. Rank into a keyword directory
/// 4. Save the directory as JSON
#[instrument(skip_all, fields(context_dir = %config.context_dir.display()))]
pub async fn build_keyword_directory(
    config: &KeywordDirectoryConfig,
    ctx: &AnalysisContext,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    progress.phase("Loading context files");
    let documents = load_context_dir(&config.context_dir).await?;

    progress.phase("Extracting keywords");
    let candidates = extract_all(&documents, &ctx.stop_words, progress);
    info!(raw = candidates.len(), "extracted raw keywords from context files");

    progress.phase("Ranking keywords");
    let mut directory = rank_keywords(&candidates, &ctx.stop_words);
    directory.generated_at = Some(Utc::now());
    info!(unique = directory.keywords.len(), "filtered to unique keywords");

    progress.phase("Saving keyword directory");
    save_keyword_directory(&config.output_path, &directory)?;

    let result = BuildResult {
        directory,
        documents: documents.len(),
        raw_candidates: candidates.len(),
        output_path: config.output_path.clone(),
        elapsed: start.elapsed(),
    };
    progress.done(&result);

    Ok(result)
}

/// Extract candidates from every document in order.
pub fn extract_all(
    documents: &[ContextDocument],
    stops: &StopWords,
    progress: &dyn ProgressReporter,
) -> Vec<KeywordCandidate> {
    let mut candidates = Vec::new();
    for (i, doc) in documents.iter().enumerate() {
        candidates.extend(extract_candidates(&doc.name, &doc.content, stops));
        progress.document_processed(&doc.name, i + 1, documents.len());
    }
    candidates
}

/// Write the directory as pretty JSON (temp file, then rename).
pub fn save_keyword_directory(path: &Path, directory: &KeywordDirectory) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KeywordLensError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(directory)
        .map_err(|e| KeywordLensError::parse(format!("failed to serialize directory: {e}")))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| KeywordLensError::validation(format!("{} is not a file path", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, json).map_err(|e| KeywordLensError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| KeywordLensError::io(path, e))?;

    debug!(path = %path.display(), keywords = directory.keywords.len(), "saved keyword directory");
    Ok(())
}

/// Read a previously saved keyword directory.
pub fn load_keyword_directory(path: &Path) -> Result<KeywordDirectory> {
    let content = std::fs::read_to_string(path).map_err(|e| KeywordLensError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| {
        KeywordLensError::parse(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Read a text file and analyze its business context.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn analyze_path(path: &Path, ctx: &AnalysisContext) -> Result<BusinessContext> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| KeywordLensError::io(path, e))?;
    Ok(ctx.classifier.analyze(&text))
}
