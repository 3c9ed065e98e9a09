//! Quantitative Scorers — pure, total functions over plain text and
//! structured metadata, each returning an integer 0–100.
//!
//! No scorer fails: every input shape, including empty text and empty repo
//! lists, has a defined numeric outcome.

pub mod audit;
pub mod complexity;
pub mod domain;
pub mod experience;
pub mod hybrid;
pub mod technical;

pub use audit::{build_audit_trail, AuditTrail, MathBreakdown};
pub use complexity::complexity_score;
pub use domain::domain_relevance_score;
pub use experience::experience_score;
pub use hybrid::{combine_scores, ConfidenceLevel, HybridScoreResult};
pub use technical::{technical_match, TechnicalMatch};

use serde::{Deserialize, Serialize};

/// The four quantitative sub-scores, each invariant to [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub technical: u32,
    pub experience: u32,
    pub complexity: u32,
    pub domain: u32,
}
