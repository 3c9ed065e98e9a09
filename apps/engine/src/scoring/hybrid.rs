use serde::{Deserialize, Serialize};

use crate::scoring::ScoreBreakdown;

/// How much a qualitative adjustment moved the score away from the
/// deterministic base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn percentage(self) -> f64 {
        match self {
            ConfidenceLevel::High => 0.95,
            ConfidenceLevel::Medium => 0.75,
            ConfidenceLevel::Low => 0.50,
        }
    }
}

/// Output of the weighted score combiner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridScoreResult {
    pub base_score: u32,
    pub final_score: u32,
    pub confidence_level: ConfidenceLevel,
    pub confidence_percentage: f64,
}

/// Combines the four quantitative sub-scores with a qualitative adjustment.
///
/// Weights: technical 40%, experience 25%, complexity 20%, domain 15%.
/// The adjustment is expected in [-20, +20] but is NOT clamped here — the
/// caller supplies a pre-clamped value (the judge-response parser enforces
/// the bound). Variance is measured on the pre-truncation floats; the
/// confidence bands use strict-less-than comparisons, so a variance of
/// exactly 10 is Medium and exactly 20 is Low.
pub fn combine_scores(breakdown: &ScoreBreakdown, adjustment: i32) -> HybridScoreResult {
    let base = breakdown.technical as f64 * 0.40
        + breakdown.experience as f64 * 0.25
        + breakdown.complexity as f64 * 0.20
        + breakdown.domain as f64 * 0.15;

    let final_score = (base + adjustment as f64).clamp(0.0, 100.0);

    let variance = (final_score - base).abs();
    let confidence_level = if variance < 10.0 {
        ConfidenceLevel::High
    } else if variance < 20.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    HybridScoreResult {
        base_score: base as u32,
        final_score: final_score as u32,
        confidence_level,
        confidence_percentage: confidence_level.percentage(),
    }
}
