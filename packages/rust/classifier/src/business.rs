//! Business-context analysis: both taxonomies, common topics, and the
//! content goals recommended for the detected business type.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use keywordlens_shared::{BusinessContext, ClassificationResult, Result, TaxonomiesConfig};

use crate::classifier::classify;
use crate::taxonomy::Taxonomy;

/// Maximum number of topics reported by [`extract_common_topics`].
pub const TOPIC_LIMIT: usize = 10;

const DEFAULT_GOAL: &str = "Build Authority";

const TOPIC_STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "have", "has", "had", "what", "when", "where", "who", "which",
    "why", "how", "the", "and", "but", "for", "nor", "yet", "so",
];

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word regex"));

/// Classifier over a business-type and a content-type taxonomy.
#[derive(Debug, Clone)]
pub struct Classifier {
    business: Taxonomy,
    content: Taxonomy,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Taxonomy::business(), Taxonomy::content())
    }
}

impl Classifier {
    pub fn new(business: Taxonomy, content: Taxonomy) -> Self {
        Self { business, content }
    }

    /// Build from config, falling back to the built-in taxonomies for
    /// sections that are not overridden.
    pub fn from_config(config: &TaxonomiesConfig) -> Result<Self> {
        let business = Taxonomy::from_entries_or("business", &config.business, Taxonomy::business)?;
        let content = Taxonomy::from_entries_or("content", &config.content, Taxonomy::content)?;
        debug!(
            business_categories = business.len(),
            content_categories = content.len(),
            "classifier taxonomies loaded"
        );
        Ok(Self::new(business, content))
    }

    pub fn business(&self) -> &Taxonomy {
        &self.business
    }

    pub fn content(&self) -> &Taxonomy {
        &self.content
    }

    pub fn business_type(&self, text: &str) -> ClassificationResult {
        classify(text, &self.business)
    }

    pub fn content_type(&self, text: &str) -> ClassificationResult {
        classify(text, &self.content)
    }

    /// Full business-context analysis of a site's text.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> BusinessContext {
        if text.is_empty() {
            return BusinessContext {
                business_type: ClassificationResult::unknown().category,
                content_type: ClassificationResult::unknown().category,
                business_confidence: 0.0,
                content_confidence: 0.0,
                common_topics: Vec::new(),
                content_goals: vec![DEFAULT_GOAL.to_string()],
            };
        }

        let business = self.business_type(text);
        let content = self.content_type(text);
        let common_topics = extract_common_topics(text);
        let content_goals = content_goals_for(&business.category)
            .iter()
            .map(|g| g.to_string())
            .collect();

        debug!(
            business = %business.category,
            content = %content.category,
            topics = common_topics.len(),
            "business context analyzed"
        );

        BusinessContext {
            business_type: business.category,
            content_type: content.category,
            business_confidence: round2(business.confidence),
            content_confidence: round2(content.confidence),
            common_topics,
            content_goals,
        }
    }
}

/// Content goals recommended for a business type.
pub fn content_goals_for(business_type: &str) -> &'static [&'static str] {
    match business_type {
        "E-commerce" => &["Drive Sales", "Generate Leads"],
        "SaaS" => &["Build Authority", "Educate Users"],
        "Service Business" => &["Generate Leads", "Build Authority"],
        "Content Creator" => &["Increase Brand Awareness", "Build Authority"],
        "Agency" => &["Generate Leads", "Build Authority"],
        _ => &[DEFAULT_GOAL],
    }
}

/// The most frequent words longer than three characters.
///
/// Words are lowercased and filtered through a small fixed stop list. Equal
/// counts keep the order of first appearance. At most [`TOPIC_LIMIT`] words
/// are returned.
pub fn extract_common_topics(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let stops: HashSet<&str> = TOPIC_STOP_WORDS.iter().copied().collect();
    let lowered = text.to_lowercase();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in WORD_RE.find_iter(&lowered) {
        let word = m.as_str();
        if word.chars().count() <= 3 || stops.contains(word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOPIC_LIMIT)
        .map(|(w, _)| w.to_string())
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
