//! Weighted pattern scoring over a taxonomy.
//!
//! Each category scores `0.6 * total_matches + 0.4 * distinct_matches`,
//! normalized by the text's word count. The winner's confidence is the
//! doubled score capped at 1.0, and anything at or below
//! [`MIN_CONFIDENCE`] is reported as unknown.

use std::collections::HashSet;

use tracing::trace;

use keywordlens_shared::ClassificationResult;

use crate::taxonomy::{PatternCategory, Taxonomy};

/// Weight of the raw match count.
const MATCH_WEIGHT: f64 = 0.6;

/// Weight of the number of distinct matched strings.
const DISTINCT_WEIGHT: f64 = 0.4;

/// Results at or below this confidence are reported as unknown.
pub const MIN_CONFIDENCE: f64 = 0.15;

/// Match counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PatternTally {
    pub matches: usize,
    pub distinct: usize,
}

impl PatternTally {
    fn weighted(&self) -> f64 {
        self.matches as f64 * MATCH_WEIGHT + self.distinct as f64 * DISTINCT_WEIGHT
    }
}

/// Count matches of every pattern of `category` in already-lowercased text.
pub(crate) fn tally(category: &PatternCategory, lowered: &str) -> PatternTally {
    let mut matches = 0;
    let mut distinct: HashSet<&str> = HashSet::new();

    for pattern in &category.patterns {
        for m in pattern.find_iter(lowered) {
            matches += 1;
            distinct.insert(m.as_str());
        }
    }

    PatternTally {
        matches,
        distinct: distinct.len(),
    }
}

/// Classify `text` against `taxonomy`.
///
/// Never fails: empty input, an empty taxonomy, no matches at all, or a
/// confidence at or below [`MIN_CONFIDENCE`] all yield
/// [`ClassificationResult::unknown`]. Ties go to the category declared first.
pub fn classify(text: &str, taxonomy: &Taxonomy) -> ClassificationResult {
    if text.is_empty() || taxonomy.is_empty() {
        return ClassificationResult::unknown();
    }

    let lowered = text.to_lowercase();
    let word_count = lowered.split_whitespace().count();

    let tallies: Vec<(&str, PatternTally)> = taxonomy
        .categories()
        .iter()
        .map(|c| (c.label.as_str(), tally(c, &lowered)))
        .collect();

    let total_matches: usize = tallies.iter().map(|(_, t)| t.matches).sum();
    if total_matches == 0 || word_count == 0 {
        return ClassificationResult::unknown();
    }

    let mut best: Option<(&str, f64)> = None;
    for (label, t) in &tallies {
        let score = t.weighted() / word_count as f64;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*label, score)),
        }
    }

    let Some((label, score)) = best else {
        return ClassificationResult::unknown();
    };

    let confidence = (score * 2.0).min(1.0);
    trace!(
        taxonomy = taxonomy.name(),
        category = label,
        score,
        confidence,
        word_count,
        "classified text"
    );

    if confidence <= MIN_CONFIDENCE {
        return ClassificationResult::unknown();
    }

    ClassificationResult {
        category: label.to_string(),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_way(first: &str, second: &str, pattern: &str) -> Taxonomy {
        Taxonomy::new(
            "test",
            vec![
                PatternCategory::compile(first, &[pattern]).unwrap(),
                PatternCategory::compile(second, &[pattern]).unwrap(),
            ],
        )
    }

    #[test]
    fn empty_text_is_unknown() {
        assert_eq!(classify("", &Taxonomy::business()), ClassificationResult::unknown());
        assert_eq!(classify("", &Taxonomy::content()), ClassificationResult::unknown());
    }

    #[test]
    fn empty_taxonomy_is_unknown() {
        let empty = Taxonomy::new("empty", vec![]);
        assert!(classify("shop checkout cart", &empty).is_unknown());
    }

    #[test]
    fn whitespace_only_text_is_unknown() {
        assert!(classify("   \n\t ", &Taxonomy::business()).is_unknown());
    }

    #[test]
    fn no_matches_is_unknown() {
        let result = classify("zzz qqq xyzzy plugh", &Taxonomy::business());
        assert_eq!(result, ClassificationResult::unknown());
    }

    #[test]
    fn ecommerce_example() {
        let text = "Our e-commerce store offers a shopping cart and checkout with great \
                    discount pricing for every shopper";
        let result = classify(text, &Taxonomy::business());
        assert_eq!(result.category, "E-commerce");
        assert!(result.confidence > MIN_CONFIDENCE);
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn single_hit_in_long_text_is_unknown() {
        let text = "we walked along the river on a quiet morning and found a small guide \
                    near the old bridge over calm water today";
        let result = classify(text, &Taxonomy::content());
        assert!(result.is_unknown());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn confidence_is_capped() {
        let result = classify("shop shop shop", &Taxonomy::business());
        assert_eq!(result.category, "E-commerce");
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn uppercase_text_matches() {
        let result = classify("CHECKOUT CART SHOP", &Taxonomy::business());
        assert_eq!(result.category, "E-commerce");
    }

    #[test]
    fn ties_go_to_first_declared_category() {
        let result = classify("alpha beta", &two_way("First", "Second", "alpha"));
        assert_eq!(result.category, "First");

        let result = classify("alpha beta", &two_way("Second", "First", "alpha"));
        assert_eq!(result.category, "Second");
    }

    #[test]
    fn tally_counts_total_and_distinct() {
        let category = PatternCategory::compile("Shop", &["cart", "cart|shop"]).unwrap();
        let t = tally(&category, "cart shop cart");
        assert_eq!(t.matches, 5);
        assert_eq!(t.distinct, 2);
    }

    #[test]
    fn confidence_bounds_hold() {
        let samples = [
            "",
            "nothing relevant here",
            "Learn how to write a tutorial with tips and best practices for every lesson",
            "Our agency runs marketing campaigns, branding strategy and seo for each client",
            "Subscription pricing for our cloud platform with analytics dashboard and api integration",
            "A case study with results, impact and improvement from a testimonial review",
            "blog",
        ];

        for taxonomy in [Taxonomy::business(), Taxonomy::content()] {
            for text in samples {
                let result = classify(text, &taxonomy);
                assert!((0.0..=1.0).contains(&result.confidence), "{text}: {result:?}");
                assert_eq!(result.is_unknown(), result.confidence == 0.0, "{text}: {result:?}");
            }
        }
    }

    #[test]
    fn deterministic_for_same_input() {
        let text = "Learn the best practices in this guide and tutorial";
        let taxonomy = Taxonomy::content();
        assert_eq!(classify(text, &taxonomy), classify(text, &taxonomy));
        assert_eq!(classify(text, &taxonomy).category, "Educational");
    }
}
