//! Audit Trail Builder — the explainable breakdown attached to a hybrid
//! score. Purely presentational: same inputs always produce the same
//! structured output, which makes it directly snapshot-testable.

use serde::{Deserialize, Serialize};

use crate::models::report::EvidenceBundle;
use crate::scoring::ScoreBreakdown;

/// Human-readable per-score breakdown entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathBreakdown {
    pub technical_skills: String,
    pub experience_level: String,
    pub project_complexity: String,
    pub domain_relevance: String,
}

/// The explainable audit trail: the math plus the evidence, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub math_breakdown: MathBreakdown,
    pub evidence_log: EvidenceBundle,
}

/// Formats scores and evidence into the audit trail. The evidence bundle
/// is embedded untransformed — no deduplication at this stage.
pub fn build_audit_trail(scores: &ScoreBreakdown, evidence: &EvidenceBundle) -> AuditTrail {
    AuditTrail {
        math_breakdown: MathBreakdown {
            technical_skills: format!("{}/100 (Weight: 40%)", scores.technical),
            experience_level: format!("{}/100 (Weight: 25%)", scores.experience),
            project_complexity: format!("{}/100 (Weight: 20%)", scores.complexity),
            domain_relevance: format!("{}/100 (Weight: 15%)", scores.domain),
        },
        evidence_log: evidence.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_formatting() {
        let scores = ScoreBreakdown {
            technical: 80,
            experience: 100,
            complexity: 50,
            domain: 0,
        };
        let trail = build_audit_trail(&scores, &EvidenceBundle::default());
        assert_eq!(trail.math_breakdown.technical_skills, "80/100 (Weight: 40%)");
        assert_eq!(trail.math_breakdown.experience_level, "100/100 (Weight: 25%)");
        assert_eq!(
            trail.math_breakdown.project_complexity,
            "50/100 (Weight: 20%)"
        );
        assert_eq!(trail.math_breakdown.domain_relevance, "0/100 (Weight: 15%)");
    }

    #[test]
    fn test_evidence_embedded_verbatim_with_duplicates() {
        let evidence = EvidenceBundle {
            strong_evidence: vec!["ships Rust".to_string(), "ships Rust".to_string()],
            weak_evidence: vec!["vague job titles".to_string()],
            missing_skills: vec!["kubernetes".to_string()],
            red_flags: vec![],
        };
        let trail = build_audit_trail(&ScoreBreakdown::default(), &evidence);
        assert_eq!(trail.evidence_log, evidence);
    }

    #[test]
    fn test_deterministic_output() {
        let scores = ScoreBreakdown {
            technical: 1,
            experience: 2,
            complexity: 3,
            domain: 4,
        };
        let evidence = EvidenceBundle::default();
        assert_eq!(
            build_audit_trail(&scores, &evidence),
            build_audit_trail(&scores, &evidence)
        );
    }
}
