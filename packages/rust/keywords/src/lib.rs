//! Keyword extraction and ranking for keywordlens.
//!
//! Pulls candidate phrases out of context documents (Markdown/text, CSV,
//! JSON), then counts, filters, deduplicates, and prioritises them into a
//! [`KeywordDirectory`](keywordlens_shared::KeywordDirectory).

pub mod extract;
pub mod ngrams;
pub mod rank;
pub mod stopwords;

pub use extract::{
    SourceKind, extract_candidates, extract_csv, extract_json, extract_keywords, extract_markdown,
};
pub use ngrams::{extract_ngrams, tokenize};
pub use rank::{is_filtered, priority_for, rank_keywords, sort_ranked};
pub use stopwords::StopWords;
