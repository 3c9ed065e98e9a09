use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static PROPER_NOUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+").expect("valid proper-noun regex"));

/// Extracts capitalized words that are not sentence-initial — a cheap
/// proper-noun detector for domain terms, avoiding heavy NLP.
///
/// A match is excluded when it sits at the very start of the text or
/// immediately follows a period-and-space, since those capitals are
/// ordinary sentence casing rather than a signal.
pub fn extract_domain_keywords(text: &str) -> BTreeSet<String> {
    PROPER_NOUN_RE
        .find_iter(text)
        .filter(|m| {
            let start = m.start();
            start != 0 && !text[..start].ends_with(". ")
        })
        .map(|m| m.as_str().to_string())
        .collect()
}
