use std::sync::LazyLock;

use regex::Regex;

static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\+?\s*years?").expect("valid years regex"));

/// Finds the largest "N years" / "N+ years" figure mentioned in the text.
///
/// A resume mentioning "10 years" alongside "2 years" on a side project
/// reports the larger, more representative figure. Returns 0 when no
/// tenure is detectable. Digit runs too large for `u32` are ignored — the
/// function is total.
pub fn extract_years_of_experience(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let lowered = text.to_lowercase();
    YEARS_RE
        .captures_iter(&lowered)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}
