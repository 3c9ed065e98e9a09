//! Consensus Aggregator — reconciles N independent judge reports into one.
//!
//! The published fit score is ALWAYS the arithmetic mean of the input
//! reports' scores, computed here before any model is consulted. Whatever
//! number the synthesis step proposes is advisory only and gets
//! overwritten, so the score stays independently reproducible from the
//! inputs.

pub mod synthesis;

pub use synthesis::{LlmSynthesizer, Synthesizer};

use tracing::{debug, info};

use crate::errors::EngineError;
use crate::models::report::{ConsensusReport, LabeledReport, Report};

/// Arithmetic mean of the numeric fit scores, rounded. Reports without a
/// numeric score are excluded from the denominator; no scored reports at
/// all yields 0.
pub fn average_fit_score(reports: &[Report]) -> u32 {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for report in reports {
        if let Some(score) = report.fit_score {
            sum += score as u64;
            count += 1;
        }
    }
    if count == 0 {
        return 0;
    }
    ((sum as f64) / (count as f64)).round() as u32
}

/// Reconciles judge reports into a single consensus report.
///
/// Provenance labels are dropped before anything reaches the synthesizer;
/// they surface only in the log line below. An empty input list and a
/// failed or unparseable synthesis both come back as
/// [`EngineError::Aggregation`] — never a panic, never a raw fault.
pub async fn aggregate(
    reports: Vec<LabeledReport>,
    synthesizer: &dyn Synthesizer,
) -> Result<ConsensusReport, EngineError> {
    if reports.is_empty() {
        return Err(EngineError::Aggregation(
            "no valid reports to synthesize".to_string(),
        ));
    }

    for labeled in &reports {
        debug!(
            source = %labeled.source_label,
            fit_score = ?labeled.report.fit_score,
            "aggregating judge report"
        );
    }

    let stripped: Vec<Report> = reports.into_iter().map(|l| l.report).collect();
    let average = average_fit_score(&stripped);

    if let [only] = stripped.as_slice() {
        // A single opinion is its own consensus; no synthesis call needed.
        return Ok(ConsensusReport {
            fit_score: average,
            summary: only.summary.clone(),
            role_strengths: only.role_strengths.clone(),
            role_weaknesses: only.role_weaknesses.clone(),
            red_flags: only.red_flags.clone(),
            interview_questions: only.interview_questions.clone(),
        });
    }

    info!(
        report_count = stripped.len(),
        average_fit_score = average,
        "synthesizing consensus report"
    );

    match synthesizer.synthesize(&stripped, average).await {
        Ok(mut consensus) => {
            // The synthesized number is advisory only.
            consensus.fit_score = average;
            Ok(consensus)
        }
        Err(e) => Err(EngineError::Aggregation(format!(
            "could not synthesize the final report: {e}"
        ))),
    }
}
