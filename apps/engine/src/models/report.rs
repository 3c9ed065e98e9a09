//! Judge report and consensus report shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// Grouped evidence supporting a score. Duplicates are permitted at this
/// layer — deduplication happens when the aggregator merges across judges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    #[serde(default)]
    pub strong_evidence: Vec<String>,
    #[serde(default)]
    pub weak_evidence: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

/// A single judge's independent fit report.
///
/// `fit_score` is optional: a report whose score is absent or non-numeric
/// is excluded from the averaging denominator, never treated as fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, deserialize_with = "lenient_score")]
    pub fit_score: Option<u32>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub role_strengths: Vec<String>,
    #[serde(default)]
    pub role_weaknesses: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
}

/// An immutable report plus the provenance label carried alongside it.
///
/// The label identifies which backend produced the report. It is used only
/// for out-of-band logging and must never leak into any text shown to a
/// downstream judge — the aggregator drops it before synthesis.
#[derive(Debug, Clone)]
pub struct LabeledReport {
    pub report: Report,
    pub source_label: String,
}

/// The single reconciled report produced from N judge reports.
///
/// `fit_score` is always the arithmetic mean of the contributing reports'
/// scores — reproducible from the inputs without re-invoking any model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusReport {
    pub fit_score: u32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub role_strengths: Vec<String>,
    #[serde(default)]
    pub role_weaknesses: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
}

/// Accepts a JSON number for `fit_score`; anything else (string, null,
/// fractional, negative) degrades to `None` instead of failing the parse.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserializes_full_shape() {
        let json = r#"{
            "fit_score": 85,
            "summary": "Strong systems background.",
            "role_strengths": ["Rust", "distributed systems"],
            "role_weaknesses": ["no frontend work"],
            "red_flags": [],
            "interview_questions": ["Walk through a recent outage."]
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.fit_score, Some(85));
        assert_eq!(report.role_strengths.len(), 2);
    }

    #[test]
    fn test_non_numeric_fit_score_degrades_to_none() {
        let report: Report =
            serde_json::from_str(r#"{"fit_score": "eighty", "summary": "x"}"#).unwrap();
        assert_eq!(report.fit_score, None);
        assert_eq!(report.summary, "x");
    }

    #[test]
    fn test_missing_fit_score_is_none() {
        let report: Report = serde_json::from_str(r#"{"summary": "x"}"#).unwrap();
        assert_eq!(report.fit_score, None);
    }

    #[test]
    fn test_negative_fit_score_degrades_to_none() {
        let report: Report = serde_json::from_str(r#"{"fit_score": -5}"#).unwrap();
        assert_eq!(report.fit_score, None);
    }
}
