use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// How many of the JD's most frequent long words to treat as domain-topic
/// proxies.
const TOP_KEYWORD_COUNT: usize = 20;

/// Minimum word length (exclusive) for a word to qualify as a topic proxy.
const MIN_WORD_LEN: usize = 4;

/// Scores how much of the JD's domain vocabulary shows up in the
/// candidate's text.
///
/// The JD is the source of truth: its words longer than four characters
/// are ranked by frequency (ties broken by first occurrence, keeping the
/// ranking deterministic) and the top 20 act as topic proxies. The score
/// is the rounded percentage of those proxies found as substrings of the
/// lowered candidate text, then boosted 1.5× and re-clamped — matching
/// every proxy is rare, so the raw percentage under-reads. The boost is
/// deliberate and preserved as-is.
pub fn domain_relevance_score(jd_text: &str, candidate_text: &str) -> u32 {
    if jd_text.is_empty() || candidate_text.is_empty() {
        return 0;
    }

    let lowered_jd = jd_text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, m) in WORD_RE.find_iter(&lowered_jd).enumerate() {
        let word = m.as_str();
        if word.chars().count() > MIN_WORD_LEN {
            let entry = counts.entry(word).or_insert((0, position));
            entry.0 += 1;
        }
    }
    if counts.is_empty() {
        return 0;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    let top: Vec<&str> = ranked
        .into_iter()
        .take(TOP_KEYWORD_COUNT)
        .map(|(word, _)| word)
        .collect();

    let lowered_candidate = candidate_text.to_lowercase();
    let matches = top
        .iter()
        .filter(|keyword| lowered_candidate.contains(**keyword))
        .count();

    let raw = ((matches as f64 / top.len() as f64) * 100.0).round();
    (raw * 1.5).round().min(100.0) as u32
}
