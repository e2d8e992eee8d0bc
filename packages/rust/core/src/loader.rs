//! Context-directory loading.
//!
//! Walks a directory recursively and reads every supported document
//! (`.md`, `.txt`, `.csv`, `.json`). Unreadable files are skipped with a
//! warning so one bad file never aborts a build.

use std::path::Path;

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use keywordlens_keywords::SourceKind;
use keywordlens_shared::{KeywordLensError, Result};

/// A document read from the context directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    /// Path relative to the context directory, `/`-separated.
    pub name: String,
    pub kind: SourceKind,
    pub content: String,
}

/// Load all supported documents under `dir`, sorted by path.
///
/// A missing directory yields no documents. A path that exists but is not a
/// directory is a validation error.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn load_context_dir(dir: &Path) -> Result<Vec<ContextDocument>> {
    if !dir.exists() {
        warn!("context directory does not exist");
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(KeywordLensError::validation(format!(
            "context path {} is not a directory",
            dir.display()
        )));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "failed to walk context entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(kind) = SourceKind::from_path(path) else {
            debug!(path = %path.display(), "skipping unsupported file");
            continue;
        };

        let name = relative_name(dir, path);
        match tokio::fs::read_to_string(path).await {
            Ok(content) => documents.push(ContextDocument {
                name,
                kind,
                content,
            }),
            Err(e) => warn!(file = %name, error = %e, "failed to read context file"),
        }
    }

    info!(count = documents.len(), "loaded context files");
    Ok(documents)
}

fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
