//! Judge layer — the polymorphic judge abstraction and its response
//! boundary.
//!
//! A judge wraps a [`ChatModel`], renders the shared context into a
//! prompt, and validates the reply into one of two explicit tagged shapes:
//! an independent report or a bounded hybrid adjustment. Anything else is
//! a backend failure, never a raw parsing fault propagated to callers.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::backends::{strip_json_fences, BackendError, ChatModel};
use crate::models::report::{EvidenceBundle, Report};

pub mod context;
pub mod prompts;

pub use context::{JudgeContext, QuantitativeSummary};

/// Bounds for a qualitative adjustment; judge values outside are clamped
/// at the parse boundary so the combiner can trust its input.
pub const ADJUSTMENT_MIN: i32 = -20;
pub const ADJUSTMENT_MAX: i32 = 20;

/// A validated hybrid-adjustment verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeAdjustment {
    /// Already clamped to [`ADJUSTMENT_MIN`]..=[`ADJUSTMENT_MAX`].
    pub adjustment: i32,
    pub reasoning: String,
    pub summary: String,
    pub evidence: EvidenceBundle,
    pub interview_questions: Vec<String>,
}

/// The two accepted judge response shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum JudgeVerdict {
    Report(Report),
    Adjustment(JudgeAdjustment),
}

/// An independently pluggable judge backend.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Provenance label, e.g. "Gemini (gemini-2.5-pro)". Used for logging
    /// and for tagging reports out-of-band; never shown to other judges.
    fn label(&self) -> &str;

    async fn evaluate(&self, ctx: &JudgeContext) -> Result<JudgeVerdict, BackendError>;
}

/// The standard judge: shared context builder in, tagged verdict out.
/// Backend-specific behavior lives entirely in the wrapped [`ChatModel`].
pub struct ReportJudge {
    label: String,
    model: Arc<dyn ChatModel>,
}

impl ReportJudge {
    pub fn new(label: impl Into<String>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            label: label.into(),
            model,
        }
    }
}

#[async_trait]
impl Judge for ReportJudge {
    fn label(&self) -> &str {
        &self.label
    }

    async fn evaluate(&self, ctx: &JudgeContext) -> Result<JudgeVerdict, BackendError> {
        let text = self
            .model
            .complete(ctx.system_prompt(), &ctx.user_message())
            .await?;
        parse_verdict(&text)
    }
}

/// Wire shape of the hybrid-adjustment reply.
#[derive(Debug, Deserialize)]
struct AdjustmentWire {
    llm_adjustment: i64,
    #[serde(default)]
    adjustment_reasoning: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    breakdown: EvidenceBundle,
    #[serde(default)]
    interview_questions: Vec<String>,
}

/// Parses a judge reply into one of the two accepted schemas.
///
/// The discriminator is the field set: `llm_adjustment` selects the
/// adjustment shape; otherwise `fit_score` or `summary` selects the
/// independent-report shape. A reply matching neither is a schema error.
pub fn parse_verdict(text: &str) -> Result<JudgeVerdict, BackendError> {
    let stripped = strip_json_fences(text);
    let value: serde_json::Value = serde_json::from_str(stripped)?;

    let object = value
        .as_object()
        .ok_or_else(|| BackendError::Schema("top-level JSON value is not an object".to_string()))?;

    if object.contains_key("llm_adjustment") {
        let wire: AdjustmentWire = serde_json::from_value(value)?;
        let clamped = wire
            .llm_adjustment
            .clamp(ADJUSTMENT_MIN as i64, ADJUSTMENT_MAX as i64) as i32;
        return Ok(JudgeVerdict::Adjustment(JudgeAdjustment {
            adjustment: clamped,
            reasoning: wire.adjustment_reasoning,
            summary: wire.summary,
            evidence: wire.breakdown,
            interview_questions: wire.interview_questions,
        }));
    }

    if object.contains_key("fit_score") || object.contains_key("summary") {
        let report: Report = serde_json::from_value(value)?;
        return Ok(JudgeVerdict::Report(report));
    }

    Err(BackendError::Schema(
        "reply carries neither 'llm_adjustment' nor 'fit_score'/'summary'".to_string(),
    ))
}
