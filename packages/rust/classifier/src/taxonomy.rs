//! Taxonomies: ordered category → pattern tables.
//!
//! Declaration order is significant: the classifier resolves ties in favour
//! of the earliest category.

use regex::{Regex, RegexBuilder};

use keywordlens_shared::{KeywordLensError, Result, TaxonomyEntry};

// ---------------------------------------------------------------------------
// Built-in pattern tables
// ---------------------------------------------------------------------------

const BUSINESS_TYPES: &[(&str, &[&str])] = &[
    (
        "E-commerce",
        &[
            r"shop|store|cart|checkout|product|inventory|shipping|order",
            r"price|discount|sale|offer|deal|buy|purchase",
            r"marketplace|vendor|seller|retail|merchant",
        ],
    ),
    (
        "SaaS",
        &[
            r"software|platform|solution|service|cloud|api|integration",
            r"subscription|pricing|enterprise|scale|automation",
            r"dashboard|analytics|monitor|track|report",
        ],
    ),
    (
        "Service Business",
        &[
            r"service|consultation|appointment|booking|schedule",
            r"client|customer|project|team|expert|professional",
            r"solution|support|help|assistance|care",
        ],
    ),
    (
        "Content Creator",
        &[
            r"blog|article|content|post|story|guide|tutorial",
            r"creator|author|writer|editor|publisher",
            r"media|video|podcast|newsletter|audience",
        ],
    ),
    (
        "Agency",
        &[
            r"agency|marketing|advertising|branding|strategy",
            r"campaign|creative|design|development|seo",
            r"client|portfolio|case study|results|roi",
        ],
    ),
];

const CONTENT_TYPES: &[(&str, &[&str])] = &[
    (
        "Educational",
        &[
            r"learn|guide|tutorial|how to|tips|best practices",
            r"understand|explain|example|lesson|course",
        ],
    ),
    (
        "Product",
        &[
            r"feature|benefit|solution|product|service",
            r"pricing|plan|package|subscription|trial",
        ],
    ),
    (
        "Industry",
        &[
            r"industry|market|trend|insight|analysis",
            r"report|study|research|survey|data",
        ],
    ),
    (
        "Case Study",
        &[
            r"case study|success story|testimonial|review",
            r"result|impact|achievement|improvement",
        ],
    ),
    (
        "Thought Leadership",
        &[
            r"vision|strategy|innovation|future|trend",
            r"expert|leader|perspective|opinion|insight",
        ],
    ),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A category label and its compiled, case-insensitive patterns.
#[derive(Debug, Clone)]
pub struct PatternCategory {
    pub label: String,
    pub patterns: Vec<Regex>,
}

impl PatternCategory {
    /// Compile `patterns` for `label`.
    pub fn compile<S: AsRef<str>>(label: impl Into<String>, patterns: &[S]) -> Result<Self> {
        let label = label.into();
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| KeywordLensError::pattern(&label, e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { label, patterns })
    }
}

/// A named, ordered mapping from category label to detection patterns.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    name: String,
    categories: Vec<PatternCategory>,
}

impl Taxonomy {
    pub fn new(name: impl Into<String>, categories: Vec<PatternCategory>) -> Self {
        Self {
            name: name.into(),
            categories,
        }
    }

    /// Build a taxonomy from config entries, keeping their order.
    pub fn from_entries(name: impl Into<String>, entries: &[TaxonomyEntry]) -> Result<Self> {
        let categories = entries
            .iter()
            .map(|e| PatternCategory::compile(e.name.clone(), e.patterns.as_slice()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, categories))
    }

    /// Built-in business-type taxonomy.
    pub fn business() -> Self {
        Self::builtin("business", BUSINESS_TYPES)
    }

    /// Built-in content-type taxonomy.
    pub fn content() -> Self {
        Self::builtin("content", CONTENT_TYPES)
    }

    /// Config entries when present, otherwise `fallback`.
    pub fn from_entries_or(
        name: &str,
        entries: &[TaxonomyEntry],
        fallback: fn() -> Self,
    ) -> Result<Self> {
        if entries.is_empty() {
            Ok(fallback())
        } else {
            Self::from_entries(name, entries)
        }
    }

    fn builtin(name: &str, table: &[(&str, &[&str])]) -> Self {
        let categories = table
            .iter()
            .map(|(label, patterns)| {
                PatternCategory::compile(*label, *patterns).expect("built-in taxonomy pattern")
            })
            .collect();
        Self::new(name, categories)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
