//! English stop-word set used by tokenization and ranking.

use std::collections::HashSet;

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// An immutable set of lowercase stop words.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    /// The standard English list.
    pub fn english() -> Self {
        Self {
            words: ENGLISH.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// The English list plus `extra` words (lowercased).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stops = Self::english();
        stops
            .words
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        stops
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_size() {
        assert_eq!(StopWords::english().len(), 179);
    }

    #[test]
    fn common_words_are_stop_words() {
        let stops = StopWords::english();
        for w in ["the", "and", "with", "for", "don't", "themselves"] {
            assert!(stops.contains(w), "{w}");
        }
        for w in ["web", "accessibility", "best", "practices"] {
            assert!(!stops.contains(w), "{w}");
        }
    }

    #[test]
    fn extra_words_are_normalized() {
        let stops = StopWords::with_extra([" Blog ", "POST"]);
        assert!(stops.contains("blog"));
        assert!(stops.contains("post"));
        assert!(stops.contains("the"));
    }
}
