//! Pattern-based text classification for keywordlens.
//!
//! Maps free text onto the best-matching category of a [`Taxonomy`]
//! (business type, content type) and derives a [`BusinessContext`] from
//! both classifications.
//!
//! [`BusinessContext`]: keywordlens_shared::BusinessContext

pub mod business;
pub mod classifier;
pub mod taxonomy;

pub use business::{Classifier, content_goals_for, extract_common_topics};
pub use classifier::classify;
pub use taxonomy::{PatternCategory, Taxonomy};
