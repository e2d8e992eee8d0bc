//! Keyword ranking: count, filter, deduplicate, prioritise, sort.
//!
//! Ranking runs as two explicit passes. The first counts every keyword text
//! across all candidates. The second filters candidates and keeps the first
//! surviving occurrence of each text, so frequencies include occurrences
//! that were later dropped as duplicates.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use keywordlens_shared::{KeywordCandidate, KeywordCategory, KeywordDirectory, Priority, RankedKeyword};

use crate::stopwords::StopWords;

/// Keywords shorter than this many characters are dropped.
const MIN_KEYWORD_CHARS: usize = 4;

/// Keywords containing any of these substrings are dropped.
///
/// This is plain substring containment, not whole-word matching: "without",
/// "forum moderation" or "other tools" are all rejected.
const DISALLOWED_SUBSTRINGS: &[&str] = &["http", "www", "the", "and", "for", "with"];

/// Whether `keyword` is excluded from the directory.
pub fn is_filtered(keyword: &str, stops: &StopWords) -> bool {
    stops.contains(keyword)
        || keyword.chars().count() < MIN_KEYWORD_CHARS
        || DISALLOWED_SUBSTRINGS.iter().any(|s| keyword.contains(s))
}

/// Priority from frequency, boosted one level for headings and emphasis.
pub fn priority_for(frequency: usize, category: KeywordCategory) -> Priority {
    let base = Priority::from_frequency(frequency);
    if category.is_prominent() {
        base.boosted()
    } else {
        base
    }
}

/// Stable sort: high priority first, then by descending frequency.
pub fn sort_ranked(keywords: &mut [RankedKeyword]) {
    keywords.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.frequency.cmp(&a.frequency))
    });
}

/// Rank raw candidates into a keyword directory.
pub fn rank_keywords(candidates: &[KeywordCandidate], stops: &StopWords) -> KeywordDirectory {
    // Pass 1: frequency over every candidate.
    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for candidate in candidates {
        *frequencies.entry(candidate.keyword.as_str()).or_insert(0) += 1;
    }

    // Pass 2: filter and keep the first occurrence.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ranked = Vec::new();
    for candidate in candidates {
        let keyword = candidate.keyword.as_str();
        if is_filtered(keyword, stops) || !seen.insert(keyword) {
            continue;
        }

        let frequency = frequencies.get(keyword).copied().unwrap_or(1);
        ranked.push(RankedKeyword {
            keyword: keyword.to_string(),
            source: candidate.source.clone(),
            frequency,
            priority: priority_for(frequency, candidate.category),
            category: candidate.category,
        });
    }

    sort_ranked(&mut ranked);

    debug!(
        candidates = candidates.len(),
        unique = frequencies.len(),
        kept = ranked.len(),
        "ranked keywords"
    );

    KeywordDirectory::new(ranked)
}
