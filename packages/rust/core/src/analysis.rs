//! Process-wide analysis context.
//!
//! Built once from [`AppConfig`] and passed explicitly to every entry point.

use keywordlens_classifier::Classifier;
use keywordlens_keywords::StopWords;
use keywordlens_shared::{AppConfig, Result};

/// Immutable taxonomies and stop words shared by all analysis calls.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub classifier: Classifier,
    pub stop_words: StopWords,
}

impl AnalysisContext {
    pub fn new(classifier: Classifier, stop_words: StopWords) -> Self {
        Self {
            classifier,
            stop_words,
        }
    }

    /// Compile taxonomies and stop words from the resolved config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let classifier = Classifier::from_config(&config.taxonomies)?;
        let stop_words = StopWords::with_extra(&config.stop_words.extra);
        Ok(Self::new(classifier, stop_words))
    }
}
