//! Tokenization and n-gram construction.

use crate::stopwords::StopWords;

/// N-grams whose joined length is at most this many characters are dropped.
const MIN_NGRAM_CHARS: usize = 3;

/// Contraction and possessive suffixes split off the word they follow.
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'re", "'ve", "'ll"];

/// Lowercase `text` and split it into purely alphabetic, non-stop-word tokens.
///
/// Tokens are whitespace separated with surrounding punctuation detached, so
/// `"practices."` becomes `"practices"` while `"e-commerce"` or `"web3"` are
/// discarded as non-alphabetic. Clitics are split first: `"google's"` keeps
/// `"google"` and `"don't"` keeps `"do"`.
pub fn tokenize(text: &str, stops: &StopWords) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split_whitespace()
        .map(|raw| strip_clitic(raw.trim_matches(|c: char| !c.is_alphanumeric())))
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
        .filter(|token| !stops.contains(token))
        .map(str::to_string)
        .collect()
}

fn strip_clitic(token: &str) -> &str {
    CLITICS
        .iter()
        .find_map(|clitic| token.strip_suffix(clitic))
        .unwrap_or(token)
}

/// Contiguous `n`-token windows of `text`, joined by single spaces.
pub fn extract_ngrams(text: &str, n: usize, stops: &StopWords) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    tokenize(text, stops)
        .windows(n)
        .map(|window| window.join(" "))
        .filter(|ngram| ngram.chars().count() > MIN_NGRAM_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bigrams_of_title() {
        let stops = StopWords::english();
        assert_eq!(
            extract_ngrams("Web Accessibility Best Practices", 2, &stops),
            vec!["web accessibility", "accessibility best", "best practices"]
        );
    }

    #[test]
    fn trigrams_of_title() {
        let stops = StopWords::english();
        assert_eq!(
            extract_ngrams("Web Accessibility Best Practices", 3, &stops),
            vec!["web accessibility best", "accessibility best practices"]
        );
    }

    #[test]
    fn tokenize_drops_stop_words_and_non_alphabetic() {
        let stops = StopWords::english();
        let tokens = tokenize("The e-commerce guide, for 2024 and beyond: web3 tips!", &stops);
        assert_eq!(tokens, vec!["guide", "beyond", "tips"]);
    }

    #[test]
    fn possessives_keep_their_base_word() {
        let stops = StopWords::english();
        assert_eq!(
            extract_ngrams("Google's search guidelines", 2, &stops),
            vec!["google search", "search guidelines"]
        );
        assert_eq!(
            tokenize("Don't miss Sarah\u{2019}s checklist, we'll review it", &stops),
            vec!["miss", "sarah", "checklist", "review"]
        );
    }

    #[test]
    fn short_ngrams_are_dropped() {
        let stops = StopWords::english();
        // "x z" is three characters long
        assert!(extract_ngrams("x z", 2, &stops).is_empty());
        assert_eq!(extract_ngrams("ab cd", 2, &stops), vec!["ab cd"]);
    }

    #[test]
    fn too_few_tokens_yield_nothing() {
        let stops = StopWords::english();
        assert!(extract_ngrams("accessibility", 2, &stops).is_empty());
        assert!(extract_ngrams("", 2, &stops).is_empty());
        assert!(extract_ngrams("anything here", 0, &stops).is_empty());
    }
}
