//! Per-source keyword extraction.
//!
//! - Markdown/text: headings, `**emphasis**`, bullet items, long paragraphs
//! - CSV: third column as a direct keyword plus bigrams of every field
//! - JSON: bigrams of string values (top-level object, or objects in a
//!   top-level array)
//!
//! Extraction fails per document: a malformed CSV or JSON file yields no
//! keywords and never aborts the batch.

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use keywordlens_shared::{KeywordCandidate, KeywordCategory, KeywordLensError, Result};

use crate::ngrams::extract_ngrams;
use crate::stopwords::StopWords;

/// Paragraphs must be longer than this many characters to be mined.
const MIN_PARAGRAPH_CHARS: usize = 100;

/// Emphasized spans are kept when their length falls in this range.
const EMPHASIS_CHARS: std::ops::RangeInclusive<usize> = 3..=50;

/// CSV fields and JSON strings must be longer than this to be mined.
const MIN_VALUE_CHARS: usize = 3;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// A run of `#` followed by whitespace and the heading text.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#+\s+(.*)").expect("heading regex"));

/// Text between double-asterisk markers.
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("emphasis regex"));

/// Lines starting (after optional indentation) with `-` or `*` and whitespace.
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]+(.*)$").expect("bullet regex"));

/// One or more blank lines between paragraphs.
static PARAGRAPH_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("paragraph regex"));

// ---------------------------------------------------------------------------
// Source kinds
// ---------------------------------------------------------------------------

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.md` and `.txt` files.
    Markdown,
    Csv,
    Json,
}

impl SourceKind {
    /// Detect the kind from a file name's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "txt" => Some(SourceKind::Markdown),
            "csv" => Some(SourceKind::Csv),
            "json" => Some(SourceKind::Json),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Extract `(keyword, category)` pairs from Markdown or plain text.
pub fn extract_markdown(content: &str, stops: &StopWords) -> Vec<(String, KeywordCategory)> {
    let content = normalize_newlines(content);
    let content = content.as_ref();
    let mut keywords = Vec::new();

    for caps in HEADING_RE.captures_iter(content) {
        push_ngrams(&mut keywords, &caps[1], 2, KeywordCategory::Heading, stops);
    }

    for caps in EMPHASIS_RE.captures_iter(content) {
        let text = &caps[1];
        if EMPHASIS_CHARS.contains(&text.chars().count()) && !text.starts_with("http") {
            keywords.push((text.to_lowercase(), KeywordCategory::Emphasis));
        }
    }

    for caps in BULLET_RE.captures_iter(content) {
        push_ngrams(&mut keywords, &caps[1], 2, KeywordCategory::BulletPoint, stops);
    }

    for paragraph in PARAGRAPH_SPLIT_RE.split(content) {
        if paragraph.chars().count() > MIN_PARAGRAPH_CHARS {
            push_ngrams(&mut keywords, paragraph, 2, KeywordCategory::Paragraph, stops);
            push_ngrams(&mut keywords, paragraph, 3, KeywordCategory::Paragraph, stops);
        }
    }

    keywords
}

/// Extract `(keyword, category)` pairs from CSV content.
///
/// The first record is treated as a header and skipped. Only records with at
/// least three fields contribute.
pub fn extract_csv(content: &str, stops: &StopWords) -> Result<Vec<(String, KeywordCategory)>> {
    let mut keywords = Vec::new();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.trim().as_bytes());

    for record in reader.records() {
        let record = record.map_err(|e| KeywordLensError::parse(format!("invalid CSV: {e}")))?;
        if record.len() < 3 {
            continue;
        }

        let direct = record[2].trim().to_lowercase();
        if direct.chars().count() > MIN_VALUE_CHARS {
            keywords.push((direct, KeywordCategory::CsvData));
        }

        for field in record.iter() {
            if field.chars().count() > MIN_VALUE_CHARS {
                push_ngrams(&mut keywords, field, 2, KeywordCategory::CsvData, stops);
            }
        }
    }

    Ok(keywords)
}

/// Extract `(keyword, category)` pairs from JSON content.
pub fn extract_json(content: &str, stops: &StopWords) -> Result<Vec<(String, KeywordCategory)>> {
    let data: Value = serde_json::from_str(content)
        .map_err(|e| KeywordLensError::parse(format!("invalid JSON: {e}")))?;

    let mut keywords = Vec::new();
    match &data {
        Value::Object(map) => push_string_values(&mut keywords, map, stops),
        Value::Array(items) => {
            for item in items {
                if let Value::Object(map) = item {
                    push_string_values(&mut keywords, map, stops);
                }
            }
        }
        _ => {}
    }

    Ok(keywords)
}

/// Extract from one document, choosing the extractor by `source` name.
///
/// Unsupported extensions and malformed documents yield an empty list.
pub fn extract_keywords(
    source: &str,
    content: &str,
    stops: &StopWords,
) -> Vec<(String, KeywordCategory)> {
    let Some(kind) = SourceKind::from_path(source) else {
        debug!(source, "unsupported document type, skipping");
        return Vec::new();
    };

    let result = match kind {
        SourceKind::Markdown => Ok(extract_markdown(content, stops)),
        SourceKind::Csv => extract_csv(content, stops),
        SourceKind::Json => extract_json(content, stops),
    };

    match result {
        Ok(keywords) => {
            debug!(source, count = keywords.len(), "extracted keywords");
            keywords
        }
        Err(e) => {
            warn!(source, error = %e, "failed to extract keywords, skipping document");
            Vec::new()
        }
    }
}

/// Like [`extract_keywords`], tagging each keyword with its source.
pub fn extract_candidates(source: &str, content: &str, stops: &StopWords) -> Vec<KeywordCandidate> {
    extract_keywords(source, content, stops)
        .into_iter()
        .map(|(keyword, category)| KeywordCandidate::new(keyword, source, category))
        .collect()
}

/// CRLF and lone CR line endings become `\n`.
fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

fn push_ngrams(
    out: &mut Vec<(String, KeywordCategory)>,
    text: &str,
    n: usize,
    category: KeywordCategory,
    stops: &StopWords,
) {
    out.extend(
        extract_ngrams(text, n, stops)
            .into_iter()
            .map(|ngram| (ngram, category)),
    );
}

fn push_string_values(
    out: &mut Vec<(String, KeywordCategory)>,
    map: &Map<String, Value>,
    stops: &StopWords,
) {
    for value in map.values() {
        if let Value::String(s) = value {
            if s.chars().count() > MIN_VALUE_CHARS {
                push_ngrams(out, s, 2, KeywordCategory::JsonData, stops);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords_of(pairs: &[(String, KeywordCategory)], category: KeywordCategory) -> Vec<&str> {
        pairs
            .iter()
            .filter(|(_, c)| *c == category)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    #[test]
    fn source_kind_from_extension() {
        assert_eq!(SourceKind::from_path("brand/voice.md"), Some(SourceKind::Markdown));
        assert_eq!(SourceKind::from_path("notes.TXT"), Some(SourceKind::Markdown));
        assert_eq!(SourceKind::from_path("keywords.csv"), Some(SourceKind::Csv));
        assert_eq!(SourceKind::from_path("site.json"), Some(SourceKind::Json));
        assert_eq!(SourceKind::from_path("logo.png"), None);
        assert_eq!(SourceKind::from_path("README"), None);
    }

    #[test]
    fn markdown_headings_become_bigrams() {
        let stops = StopWords::english();
        let md = "# Web Accessibility Best Practices\n\nShort text.\n## Color Contrast\n";
        let pairs = extract_markdown(md, &stops);
        assert_eq!(
            keywords_of(&pairs, KeywordCategory::Heading),
            vec![
                "web accessibility",
                "accessibility best",
                "best practices",
                "color contrast"
            ]
        );
    }

    #[test]
    fn markdown_emphasis_kept_verbatim() {
        let stops = StopWords::english();
        let md = "Use **Screen Readers** and **ok** but not **https://example.com** links.";
        let pairs = extract_markdown(md, &stops);
        assert_eq!(keywords_of(&pairs, KeywordCategory::Emphasis), vec!["screen readers"]);
    }

    #[test]
    fn markdown_emphasis_length_bounds() {
        let stops = StopWords::english();
        let long = "a".repeat(51);
        let md = format!("**abc** and **{long}**");
        let pairs = extract_markdown(&md, &stops);
        assert_eq!(keywords_of(&pairs, KeywordCategory::Emphasis), vec!["abc"]);
    }

    #[test]
    fn markdown_bullets() {
        let stops = StopWords::english();
        let md = "Intro line\n- Keyboard navigation support\n  * Focus states\nnot - a bullet\n";
        let pairs = extract_markdown(md, &stops);
        assert_eq!(
            keywords_of(&pairs, KeywordCategory::BulletPoint),
            vec!["keyboard navigation", "navigation support", "focus states"]
        );
    }

    #[test]
    fn markdown_long_paragraphs_only() {
        let stops = StopWords::english();
        let long = "Accessible websites help screen reader users navigate content quickly \
                    while keyboard users rely on visible focus indicators everywhere.";
        assert!(long.chars().count() > 100);
        let md = format!("Short paragraph here.\n\n{long}");
        let pairs = extract_markdown(&md, &stops);
        let paragraph = keywords_of(&pairs, KeywordCategory::Paragraph);
        assert!(paragraph.contains(&"accessible websites"));
        assert!(paragraph.contains(&"accessible websites help"));
        assert!(!paragraph.iter().any(|k| k.contains("short")));
    }

    #[test]
    fn crlf_paragraphs_split_like_lf() {
        let stops = StopWords::english();
        let lf = "# Accessibility Notes\n\n\
                  Short first paragraph about screen readers.\n\n\
                  Second short paragraph on color contrast.\n\n\
                  - Keyboard navigation support\n\n\
                  Third short paragraph covering focus states.\n";
        let crlf = lf.replace('\n', "\r\n");

        let from_lf = extract_markdown(lf, &stops);
        let from_crlf = extract_markdown(&crlf, &stops);

        assert!(keywords_of(&from_crlf, KeywordCategory::Paragraph).is_empty());
        assert_eq!(from_crlf, from_lf);
    }

    #[test]
    fn csv_skips_header_and_uses_third_column() {
        let stops = StopWords::english();
        let csv = "id,topic,keyword\n1,Site Speed,Core Web Vitals\n2,x,seo\n3,only two\n";
        let pairs = extract_csv(csv, &stops).unwrap();
        let keywords: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();

        assert!(pairs.iter().all(|(_, c)| *c == KeywordCategory::CsvData));
        assert_eq!(keywords[0], "core web vitals");
        assert!(keywords.contains(&"site speed"));
        assert!(keywords.contains(&"core web"));
        assert!(keywords.contains(&"web vitals"));
        // header row and the two-column row contribute nothing
        assert!(!keywords.iter().any(|k| k.contains("topic") || k.contains("only")));
        // "seo" is too short to be a direct keyword
        assert!(!keywords.contains(&"seo"));
    }

    #[test]
    fn csv_handles_quoted_fields() {
        let stops = StopWords::english();
        let csv = "a,b,c\n1,\"Guides, Tutorials\",\"Link Building Tips\"\n";
        let pairs = extract_csv(csv, &stops).unwrap();
        let keywords: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keywords[0], "link building tips");
        assert!(keywords.contains(&"guides tutorials"));
    }

    #[test]
    fn json_object_and_array_values() {
        let stops = StopWords::english();
        let object = r#"{"title": "Content Marketing Strategy", "count": 3, "tag": "seo"}"#;
        let pairs = extract_json(object, &stops).unwrap();
        assert_eq!(
            keywords_of(&pairs, KeywordCategory::JsonData),
            vec!["content marketing", "marketing strategy"]
        );

        let array = r#"[{"name": "Email Newsletter Growth"}, "loose string", {"n": 1}]"#;
        let pairs = extract_json(array, &stops).unwrap();
        assert_eq!(
            keywords_of(&pairs, KeywordCategory::JsonData),
            vec!["email newsletter", "newsletter growth"]
        );
    }

    #[test]
    fn json_nested_values_are_ignored() {
        let stops = StopWords::english();
        let nested = r#"{"outer": {"inner": "Deep Nested Value"}}"#;
        assert!(extract_json(nested, &stops).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error_but_extract_keywords_is_empty() {
        let stops = StopWords::english();
        let bad = r#"{"title": "Unclosed"#;
        assert!(extract_json(bad, &stops).is_err());
        assert!(extract_keywords("site.json", bad, &stops).is_empty());
    }

    #[test]
    fn unsupported_source_yields_nothing() {
        let stops = StopWords::english();
        assert!(extract_keywords("image.png", "# Heading Words Here", &stops).is_empty());
    }

    #[test]
    fn candidates_carry_source() {
        let stops = StopWords::english();
        let candidates = extract_candidates("guide.md", "# Color Contrast Ratios", &stops);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.source == "guide.md"));
        assert_eq!(candidates[0].keyword, "color contrast");
        assert_eq!(candidates[0].category, KeywordCategory::Heading);
    }
}
