use serde::{Deserialize, Serialize};

use crate::extraction::extract_skills;

/// Technical-match score with the evidence behind it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalMatch {
    pub score: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Scores the overlap between the candidate's skills and the JD's skills.
///
/// A JD with zero recognized skill keywords carries no signal to measure
/// against and scores 0 with empty lists. Otherwise the score is the
/// rounded percentage of JD skills the candidate covers. Lists come out
/// sorted (set iteration order) so output is deterministic.
pub fn technical_match(candidate_text: &str, jd_text: &str) -> TechnicalMatch {
    let jd_skills = extract_skills(jd_text);
    if jd_skills.is_empty() {
        return TechnicalMatch::default();
    }
    let candidate_skills = extract_skills(candidate_text);

    let matched: Vec<String> = jd_skills.intersection(&candidate_skills).cloned().collect();
    let missing: Vec<String> = jd_skills.difference(&candidate_skills).cloned().collect();

    let score = ((matched.len() as f64 / jd_skills.len() as f64) * 100.0).round() as u32;

    TechnicalMatch {
        score,
        matched,
        missing,
    }
}
