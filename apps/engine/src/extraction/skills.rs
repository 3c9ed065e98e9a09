use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Single-token skill vocabulary. In a production deployment this would be
/// backed by a curated database; the fixed list keeps extraction
/// deterministic and cheap.
const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "fastapi",
    "django",
    "flask",
    "spring",
    "node.js",
    "express",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "pytorch",
    "tensorflow",
    "scikit-learn",
    "git",
    "linux",
    "agile",
    "scrum",
    "graphql",
];

/// Multi-word phrases matched against the raw lowered text, before
/// tokenization erases their separators (the `/` in "ci/cd", the space in
/// "rest api").
const MULTI_WORD_SKILLS: &[&str] = &["machine learning", "deep learning", "ci/cd", "rest api"];

static VOCABULARY: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SKILL_VOCABULARY.iter().copied().collect());

/// Extracts canonical skill tokens from free text.
///
/// Lowercases the input, checks the multi-word phrase list as substrings of
/// the raw lowered text, then replaces every character outside
/// `[a-z0-9+.]` with whitespace and intersects the resulting tokens with
/// the single-token vocabulary. Returns an empty set for empty text.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    if text.is_empty() {
        return found;
    }

    let lowered = text.to_lowercase();

    for phrase in MULTI_WORD_SKILLS {
        if lowered.contains(phrase) {
            found.insert((*phrase).to_string());
        }
    }

    let sanitized: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == '.' {
                c
            } else {
                ' '
            }
        })
        .collect();

    for token in sanitized.split_whitespace() {
        if VOCABULARY.contains(token) {
            found.insert(token.to_string());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_single_token_skills_found_case_insensitive() {
        let skills = extract_skills("Expert in Python, Docker and PostgreSQL");
        assert!(skills.contains("python"));
        assert!(skills.contains("docker"));
        assert!(skills.contains("postgresql"));
    }

    #[test]
    fn test_multi_word_phrase_survives_tokenization() {
        let skills = extract_skills("Built Machine Learning pipelines with CI/CD.");
        assert!(skills.contains("machine learning"));
        assert!(skills.contains("ci/cd"));
    }

    #[test]
    fn test_punctuation_preserving_tokens() {
        // '+' and '.' are kept by sanitization, so these survive as tokens.
        let skills = extract_skills("Worked with C++ and Node.js daily");
        assert!(skills.contains("c++"));
        assert!(skills.contains("node.js"));
    }

    #[test]
    fn test_unknown_words_ignored() {
        let skills = extract_skills("basket weaving and pottery");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_no_partial_word_matches() {
        // "java" must not be extracted from "javascript" — tokenization
        // splits on non-[a-z0-9+.] characters, never inside a word.
        let skills = extract_skills("javascript");
        assert!(skills.contains("javascript"));
        assert!(!skills.contains("java"));
    }
}
