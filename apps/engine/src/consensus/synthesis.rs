//! The synthesis collaborator: merges several judge reports into one
//! consensus draft via a meta-analysis model call.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::backends::{strip_json_fences, BackendError, ChatModel};
use crate::judges::prompts::SYNTHESIS_SYSTEM;
use crate::models::report::{ConsensusReport, Report};

/// Synthesizes stripped (label-free) reports into one consensus draft.
///
/// Implementations are told the precomputed average fit score and are
/// instructed to use it verbatim; the aggregator overwrites the returned
/// number anyway.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        reports: &[Report],
        average_fit_score: u32,
    ) -> Result<ConsensusReport, BackendError>;
}

/// Wire shape of the synthesis reply. `fit_score` is ignored — the
/// aggregator's average wins — so its absence is not an error.
#[derive(Debug, Deserialize)]
struct ConsensusWire {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    role_strengths: Vec<String>,
    #[serde(default)]
    role_weaknesses: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
    #[serde(default)]
    interview_questions: Vec<String>,
}

/// Model-backed synthesizer over any [`ChatModel`].
pub struct LlmSynthesizer {
    model: Arc<dyn ChatModel>,
}

impl LlmSynthesizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    fn build_user_message(reports: &[Report], average_fit_score: u32) -> String {
        let mut blocks = Vec::with_capacity(reports.len());
        for (index, report) in reports.iter().enumerate() {
            blocks.push(format!(
                "--- REPORT {} ---\n{}",
                index + 1,
                serde_json::to_string_pretty(report).unwrap_or_default()
            ));
        }
        format!(
            "Here are the {} AI reports to synthesize:\n\n{}\n\n--- ANALYSIS ---\n\
             Please synthesize these into a single, final JSON report.\n\
             Use a \"fit_score\" of {}.",
            reports.len(),
            blocks.join("\n\n"),
            average_fit_score
        )
    }
}

#[async_trait]
impl Synthesizer for LlmSynthesizer {
    async fn synthesize(
        &self,
        reports: &[Report],
        average_fit_score: u32,
    ) -> Result<ConsensusReport, BackendError> {
        let user = Self::build_user_message(reports, average_fit_score);
        let text = self.model.complete(SYNTHESIS_SYSTEM, &user).await?;
        let wire: ConsensusWire = serde_json::from_str(strip_json_fences(&text))?;
        Ok(ConsensusReport {
            fit_score: average_fit_score,
            summary: wire.summary,
            role_strengths: wire.role_strengths,
            role_weaknesses: wire.role_weaknesses,
            red_flags: wire.red_flags,
            interview_questions: wire.interview_questions,
        })
    }
}
