//! Core domain types for classification results and keyword directories.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::KeywordLensError;

/// Category label reported when a text carries no usable signal.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// ---------------------------------------------------------------------------
// ClassificationResult
// ---------------------------------------------------------------------------

/// Best-fit category of a taxonomy together with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category label, or [`UNKNOWN_CATEGORY`].
    pub category: String,
    /// Confidence in `[0.0, 1.0]`; exactly `0.0` for unknown results.
    pub confidence: f64,
}

impl ClassificationResult {
    /// The "no usable signal" sentinel.
    pub fn unknown() -> Self {
        Self {
            category: UNKNOWN_CATEGORY.to_string(),
            confidence: 0.0,
        }
    }

    /// Whether this is the sentinel rather than a taxonomy member.
    pub fn is_unknown(&self) -> bool {
        self.category == UNKNOWN_CATEGORY
    }
}

// ---------------------------------------------------------------------------
// Keyword categories and priorities
// ---------------------------------------------------------------------------

/// Structural origin of a keyword candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Heading,
    Emphasis,
    BulletPoint,
    Paragraph,
    CsvData,
    JsonData,
}

impl KeywordCategory {
    /// Tag as written in the keyword directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Heading => "heading",
            KeywordCategory::Emphasis => "emphasis",
            KeywordCategory::BulletPoint => "bullet_point",
            KeywordCategory::Paragraph => "paragraph",
            KeywordCategory::CsvData => "csv_data",
            KeywordCategory::JsonData => "json_data",
        }
    }

    /// Headings and emphasized spans earn a one-level priority boost.
    pub fn is_prominent(&self) -> bool {
        matches!(self, KeywordCategory::Heading | KeywordCategory::Emphasis)
    }
}

impl std::fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KeywordCategory {
    type Err = KeywordLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(KeywordCategory::Heading),
            "emphasis" => Ok(KeywordCategory::Emphasis),
            "bullet_point" => Ok(KeywordCategory::BulletPoint),
            "paragraph" => Ok(KeywordCategory::Paragraph),
            "csv_data" => Ok(KeywordCategory::CsvData),
            "json_data" => Ok(KeywordCategory::JsonData),
            other => Err(KeywordLensError::validation(format!(
                "unknown keyword category '{other}'"
            ))),
        }
    }
}

/// Three-level importance of a ranked keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Base priority from the total occurrence count.
    pub fn from_frequency(frequency: usize) -> Self {
        match frequency {
            0 | 1 => Priority::Low,
            2 | 3 => Priority::Medium,
            _ => Priority::High,
        }
    }

    /// One level up, saturating at `High`.
    pub fn boosted(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium | Priority::High => Priority::High,
        }
    }

    /// Sort rank: high first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Candidates and ranked keywords
// ---------------------------------------------------------------------------

/// A single raw keyword observation before deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCandidate {
    /// Lowercase, single-space separated keyword text.
    pub keyword: String,
    /// Name of the originating document.
    pub source: String,
    /// Structural origin inside that document.
    pub category: KeywordCategory,
}

impl KeywordCandidate {
    pub fn new(keyword: impl Into<String>, source: impl Into<String>, category: KeywordCategory) -> Self {
        Self {
            keyword: keyword.into(),
            source: source.into(),
            category,
        }
    }
}

/// One entry of the keyword directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    /// Source of the first kept occurrence.
    pub source: String,
    /// Occurrences across all candidates, counted before filtering.
    pub frequency: usize,
    pub priority: Priority,
    /// Category of the first kept occurrence.
    pub category: KeywordCategory,
}

/// Aggregate counts over a ranked keyword list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    pub total_keywords: usize,
    pub high_priority_keywords: usize,
    pub medium_priority_keywords: usize,
    pub low_priority_keywords: usize,
    pub categories: BTreeSet<KeywordCategory>,
    pub sources: BTreeSet<String>,
}

impl DirectorySummary {
    /// Summarize an already ranked keyword list.
    pub fn from_keywords(keywords: &[RankedKeyword]) -> Self {
        let mut summary = Self {
            total_keywords: keywords.len(),
            ..Self::default()
        };

        for kw in keywords {
            match kw.priority {
                Priority::High => summary.high_priority_keywords += 1,
                Priority::Medium => summary.medium_priority_keywords += 1,
                Priority::Low => summary.low_priority_keywords += 1,
            }
            summary.categories.insert(kw.category);
            summary.sources.insert(kw.source.clone());
        }

        summary
    }
}

/// The keyword directory document written by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDirectory {
    /// Ranked keywords, high priority first.
    pub keywords: Vec<RankedKeyword>,
    #[serde(flatten)]
    pub summary: DirectorySummary,
    /// Set by the pipeline when the directory is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl KeywordDirectory {
    /// Build a directory and its summary from a ranked list.
    pub fn new(keywords: Vec<RankedKeyword>) -> Self {
        let summary = DirectorySummary::from_keywords(&keywords);
        Self {
            keywords,
            summary,
            generated_at: None,
        }
    }

    /// The first `n` keyword strings in rank order.
    pub fn top(&self, n: usize) -> Vec<&str> {
        self.top_in(n, None)
    }

    /// The first `n` keyword strings in rank order, optionally restricted to
    /// one category.
    pub fn top_in(&self, n: usize, category: Option<KeywordCategory>) -> Vec<&str> {
        self.keywords
            .iter()
            .filter(|kw| category.is_none_or(|c| kw.category == c))
            .take(n)
            .map(|kw| kw.keyword.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// BusinessContext
// ---------------------------------------------------------------------------

/// Combined business/content classification of a site's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessContext {
    pub business_type: String,
    pub content_type: String,
    /// Rounded to two decimals.
    pub business_confidence: f64,
    /// Rounded to two decimals.
    pub content_confidence: f64,
    pub common_topics: Vec<String>,
    pub content_goals: Vec<String>,
}
