//! Keyword tokenization shared by indexing and querying.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Tokens shorter than this many characters are not indexed.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Split text on word boundaries, lowercase, and drop short tokens.
///
/// Repeated words are kept; callers that need a set deduplicate themselves.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenize() {
        let tokens = tokenize("Apply before March 1st for Fall admission.");
        assert_eq!(
            tokens,
            vec!["apply", "before", "march", "1st", "for", "fall", "admission"]
        );
    }

    #[test]
    fn test_short_tokens_dropped() {
        assert_eq!(tokenize("Go to a lab, or an IT desk"), vec!["lab", "desk"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("?!  ...").is_empty());
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(tokenize("e-mail: admissions@college.edu"), vec!["mail", "admissions", "college", "edu"]);
    }

    #[test]
    fn test_idempotent() {
        let once = tokenize("Campus LIBRARY hours: Monday–Friday, 8am");
        let twice = tokenize(&once.join(" "));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_case_insensitive_symmetry() {
        let indexed = tokenize("Scholarship applications are OPEN");
        for word in ["scholarship", "SCHOLARSHIP", "Scholarship"] {
            let query = tokenize(&format!("how do {} work?", word));
            assert!(query.iter().any(|q| indexed.contains(q)), "{} should match", word);
        }
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize("Café Über"), vec!["café", "über"]);
    }
}
