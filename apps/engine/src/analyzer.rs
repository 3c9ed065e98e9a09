//! Analysis pipeline — the single entry point accepting normalized inputs
//! and returning a populated report or a structured error.
//!
//! Flow: quantitative scorers → concurrent judge dispatch (per-backend
//! timeout) → hybrid combine or consensus aggregation, the whole thing
//! wrapped in the content-addressable cache at the request boundary.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backends::{AnthropicModel, GeminiModel, OpenAiCompatModel};
use crate::cache::{AnalysisCache, CacheKey};
use crate::config::EngineConfig;
use crate::consensus::{aggregate, LlmSynthesizer, Synthesizer};
use crate::errors::EngineError;
use crate::judges::{Judge, JudgeContext, JudgeVerdict, QuantitativeSummary, ReportJudge};
use crate::models::inputs::AnalysisInputs;
use crate::models::report::{ConsensusReport, LabeledReport};
use crate::scoring::{
    build_audit_trail, combine_scores, complexity_score, domain_relevance_score, experience_score,
    technical_match, AuditTrail, HybridScoreResult, ScoreBreakdown,
};

/// Hybrid-path output: the deterministic math, the judge's bounded
/// adjustment folded in, and the explainable audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridReport {
    pub breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub outcome: HybridScoreResult,
    pub audit: AuditTrail,
    pub summary: String,
    pub adjustment_reasoning: String,
    pub interview_questions: Vec<String>,
}

/// What one analysis produced, depending on the pipeline variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisReport {
    Consensus(ConsensusReport),
    Hybrid(HybridReport),
}

impl AnalysisReport {
    /// The published 0–100 fit score, whichever variant produced it.
    pub fn fit_score(&self) -> u32 {
        match self {
            AnalysisReport::Consensus(consensus) => consensus.fit_score,
            AnalysisReport::Hybrid(hybrid) => hybrid.outcome.final_score,
        }
    }
}

/// Envelope stamped at generation time. A cached outcome keeps its
/// original stamp — the content is byte-identical by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub generated_at: DateTime<Utc>,
    pub report: AnalysisReport,
}

/// The engine facade: owns the judge set, the synthesizer, and the cache.
pub struct Analyzer {
    judges: Vec<Arc<dyn Judge>>,
    synthesizer: Arc<dyn Synthesizer>,
    cache: AnalysisCache<AnalysisOutcome>,
    judge_timeout: Duration,
}

impl Analyzer {
    pub fn new(
        judges: Vec<Arc<dyn Judge>>,
        synthesizer: Arc<dyn Synthesizer>,
        cache: AnalysisCache<AnalysisOutcome>,
        judge_timeout: Duration,
    ) -> Self {
        Self {
            judges,
            synthesizer,
            cache,
            judge_timeout,
        }
    }

    /// Wires judges and a synthesizer from configured API keys. At least
    /// one backend must be configured; the synthesizer uses the first
    /// available provider, Gemini preferred.
    pub fn from_config(config: &EngineConfig) -> anyhow::Result<Self> {
        let mut judges: Vec<Arc<dyn Judge>> = Vec::new();
        let mut synthesis_model: Option<Arc<dyn crate::backends::ChatModel>> = None;

        if let Some(key) = &config.gemini_api_key {
            let model: Arc<dyn crate::backends::ChatModel> = Arc::new(GeminiModel::new(
                key.clone(),
                config.gemini_model.clone(),
            ));
            judges.push(Arc::new(ReportJudge::new(
                format!("Gemini ({})", config.gemini_model),
                Arc::clone(&model),
            )));
            synthesis_model = Some(model);
        }

        if let Some(key) = &config.anthropic_api_key {
            let model: Arc<dyn crate::backends::ChatModel> =
                Arc::new(AnthropicModel::new(key.clone()));
            judges.push(Arc::new(ReportJudge::new(
                format!("Anthropic ({})", crate::backends::anthropic::MODEL),
                Arc::clone(&model),
            )));
            if synthesis_model.is_none() {
                synthesis_model = Some(model);
            }
        }

        if let Some(key) = &config.openai_api_key {
            let model: Arc<dyn crate::backends::ChatModel> = Arc::new(OpenAiCompatModel::new(
                key.clone(),
                config.openai_base_url.clone(),
                config.openai_model.clone(),
            ));
            judges.push(Arc::new(ReportJudge::new(
                format!("OpenAI ({})", config.openai_model),
                Arc::clone(&model),
            )));
            if synthesis_model.is_none() {
                synthesis_model = Some(model);
            }
        }

        let synthesis_model = synthesis_model
            .ok_or_else(|| anyhow::anyhow!("at least one judge backend must be configured"))?;

        Ok(Self::new(
            judges,
            Arc::new(LlmSynthesizer::new(synthesis_model)),
            AnalysisCache::new(
                config.cache_capacity,
                Duration::from_secs(config.cache_ttl_secs),
            ),
            Duration::from_secs(config.judge_timeout_secs),
        ))
    }

    /// Runs one full analysis, memoized by the content hash of `inputs`.
    pub async fn analyze(&self, inputs: AnalysisInputs) -> Result<AnalysisOutcome, EngineError> {
        let key = CacheKey::for_value(&inputs)?;
        let request_id = Uuid::new_v4();
        info!(%request_id, cache_key = %key, "starting candidate analysis");

        self.cache
            .get_or_compute(key, || self.run_pipeline(request_id, inputs))
            .await
    }

    async fn run_pipeline(
        &self,
        request_id: Uuid,
        inputs: AnalysisInputs,
    ) -> Result<AnalysisOutcome, EngineError> {
        // Quantitative path: pure string/metadata work, no I/O.
        let corpus = inputs.candidate_corpus();
        let technical = technical_match(&corpus, &inputs.job_description);
        let breakdown = ScoreBreakdown {
            technical: technical.score,
            experience: experience_score(&inputs.resume_text, &inputs.job_description),
            complexity: complexity_score(&inputs.repos),
            domain: domain_relevance_score(&inputs.job_description, &corpus),
        };
        info!(%request_id, ?breakdown, "quantitative scores computed");

        // Exactly one judge → hybrid adjustment mode; several → independent
        // reports reconciled by the aggregator.
        let hybrid_mode = self.judges.len() == 1;
        let ctx = Arc::new(JudgeContext {
            profile: inputs.profile.clone(),
            repos: inputs.repos.clone(),
            readmes: inputs.readmes.clone(),
            job_description: inputs.job_description.clone(),
            resume_text: inputs.resume_text.clone(),
            linkedin_text: inputs.linkedin_text.clone(),
            quantitative: hybrid_mode.then(|| QuantitativeSummary {
                breakdown,
                matched_skills: technical.matched.clone(),
                missing_skills: technical.missing.clone(),
            }),
        });

        let verdicts = self.dispatch_judges(request_id, ctx).await;
        if verdicts.is_empty() {
            return Err(EngineError::AllBackendsFailed);
        }

        let mut reports: Vec<LabeledReport> = Vec::new();
        let mut adjustment = None;
        for (label, verdict) in verdicts {
            match verdict {
                JudgeVerdict::Report(report) => reports.push(LabeledReport {
                    report,
                    source_label: label,
                }),
                JudgeVerdict::Adjustment(adj) if hybrid_mode && adjustment.is_none() => {
                    adjustment = Some(adj);
                }
                JudgeVerdict::Adjustment(_) => {
                    // Adjustments are only meaningful against the
                    // quantitative base shown to a lone judge.
                    warn!(%request_id, source = %label, "discarding unexpected adjustment verdict");
                }
            }
        }

        let report = if let Some(adjustment) = adjustment {
            let outcome = combine_scores(&breakdown, adjustment.adjustment);
            let audit = build_audit_trail(&breakdown, &adjustment.evidence);
            info!(
                %request_id,
                base_score = outcome.base_score,
                final_score = outcome.final_score,
                adjustment = adjustment.adjustment,
                "hybrid score combined"
            );
            AnalysisReport::Hybrid(HybridReport {
                breakdown,
                matched_skills: technical.matched,
                missing_skills: technical.missing,
                outcome,
                audit,
                summary: adjustment.summary,
                adjustment_reasoning: adjustment.reasoning,
                interview_questions: adjustment.interview_questions,
            })
        } else {
            let consensus = aggregate(reports, self.synthesizer.as_ref()).await?;
            info!(%request_id, fit_score = consensus.fit_score, "consensus report ready");
            AnalysisReport::Consensus(consensus)
        };

        Ok(AnalysisOutcome {
            generated_at: Utc::now(),
            report,
        })
    }

    /// Dispatches every judge concurrently, joining with a per-backend
    /// timeout. Any subset of backends may fail independently: failures
    /// and timeouts are logged with their label and excluded.
    async fn dispatch_judges(
        &self,
        request_id: Uuid,
        ctx: Arc<JudgeContext>,
    ) -> Vec<(String, JudgeVerdict)> {
        let mut tasks = JoinSet::new();
        for judge in &self.judges {
            let judge = Arc::clone(judge);
            let ctx = Arc::clone(&ctx);
            let timeout = self.judge_timeout;
            tasks.spawn(async move {
                let label = judge.label().to_string();
                let result = tokio::time::timeout(timeout, judge.evaluate(&ctx)).await;
                (label, result)
            });
        }

        let mut verdicts = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((label, Ok(Ok(verdict)))) => {
                    info!(%request_id, source = %label, "judge verdict received");
                    verdicts.push((label, verdict));
                }
                Ok((label, Ok(Err(e)))) => {
                    warn!(%request_id, source = %label, error = %e, "judge backend failed");
                }
                Ok((label, Err(_elapsed))) => {
                    warn!(%request_id, source = %label, "judge backend timed out");
                }
                Err(join_error) => {
                    warn!(%request_id, error = %join_error, "judge task aborted");
                }
            }
        }
        verdicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::backends::BackendError;
    use crate::judges::JudgeAdjustment;
    use crate::models::github::{ProfileSummary, RepoMetadata};
    use crate::models::report::Report;

    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A scripted judge: counts invocations, then fails or returns the
    /// configured verdict.
    struct ScriptedJudge {
        label: String,
        verdict: Option<JudgeVerdict>,
        calls: Arc<AtomicUsize>,
        delay: Option<Duration>,
    }

    impl ScriptedJudge {
        fn reporting(label: &str, fit_score: u32, calls: &Arc<AtomicUsize>) -> Arc<dyn Judge> {
            Arc::new(Self {
                label: label.to_string(),
                verdict: Some(JudgeVerdict::Report(Report {
                    fit_score: Some(fit_score),
                    summary: format!("summary from {label}"),
                    ..Report::default()
                })),
                calls: Arc::clone(calls),
                delay: None,
            })
        }

        fn adjusting(label: &str, adjustment: i32, calls: &Arc<AtomicUsize>) -> Arc<dyn Judge> {
            Arc::new(Self {
                label: label.to_string(),
                verdict: Some(JudgeVerdict::Adjustment(JudgeAdjustment {
                    adjustment,
                    reasoning: "scripted reasoning".to_string(),
                    summary: "scripted summary".to_string(),
                    evidence: Default::default(),
                    interview_questions: vec!["q1".to_string()],
                })),
                calls: Arc::clone(calls),
                delay: None,
            })
        }

        fn failing(label: &str, calls: &Arc<AtomicUsize>) -> Arc<dyn Judge> {
            Arc::new(Self {
                label: label.to_string(),
                verdict: None,
                calls: Arc::clone(calls),
                delay: None,
            })
        }

        fn slow(label: &str, delay: Duration, calls: &Arc<AtomicUsize>) -> Arc<dyn Judge> {
            Arc::new(Self {
                label: label.to_string(),
                verdict: Some(JudgeVerdict::Report(Report {
                    fit_score: Some(50),
                    ..Report::default()
                })),
                calls: Arc::clone(calls),
                delay: Some(delay),
            })
        }
    }

    #[async_trait]
    impl Judge for ScriptedJudge {
        fn label(&self) -> &str {
            &self.label
        }

        async fn evaluate(&self, _ctx: &JudgeContext) -> Result<JudgeVerdict, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.verdict
                .clone()
                .ok_or_else(|| BackendError::Api {
                    status: 500,
                    message: "scripted failure".to_string(),
                })
        }
    }

    /// Pass-through synthesizer that merges summaries mechanically.
    struct MergingSynthesizer;

    #[async_trait]
    impl Synthesizer for MergingSynthesizer {
        async fn synthesize(
            &self,
            reports: &[Report],
            average_fit_score: u32,
        ) -> Result<ConsensusReport, BackendError> {
            Ok(ConsensusReport {
                fit_score: average_fit_score,
                summary: reports
                    .iter()
                    .map(|r| r.summary.as_str())
                    .collect::<Vec<_>>()
                    .join(" | "),
                role_strengths: vec![],
                role_weaknesses: vec![],
                red_flags: vec![],
                interview_questions: vec![],
            })
        }
    }

    fn analyzer(judges: Vec<Arc<dyn Judge>>) -> Analyzer {
        Analyzer::new(
            judges,
            Arc::new(MergingSynthesizer),
            AnalysisCache::new(16, Duration::from_secs(60)),
            Duration::from_millis(200),
        )
    }

    fn inputs() -> AnalysisInputs {
        AnalysisInputs {
            job_description: "We need 3+ years of Python and Docker experience.".to_string(),
            resume_text: "5 years of Python, Docker and PostgreSQL.".to_string(),
            linkedin_text: None,
            profile: ProfileSummary {
                bio: Some("Backend engineer".to_string()),
                public_repos: 4,
            },
            repos: vec![RepoMetadata {
                name: "pipeline".to_string(),
                language: Some("Python".to_string()),
                description: Some("ETL pipeline".to_string()),
                stargazers_count: 25,
                size: 2_000,
                ..RepoMetadata::default()
            }],
            readmes: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_multi_judge_consensus_averages_scores() {
        init_test_tracing();
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![
            ScriptedJudge::reporting("A", 80, &calls),
            ScriptedJudge::reporting("B", 60, &calls),
        ]);

        let outcome = analyzer.analyze(inputs()).await.unwrap();
        match outcome.report {
            AnalysisReport::Consensus(consensus) => {
                assert_eq!(consensus.fit_score, 70);
                assert!(consensus.summary.contains("summary from A"));
                assert!(consensus.summary.contains("summary from B"));
            }
            other => panic!("expected consensus, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_judge_hybrid_path() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![ScriptedJudge::adjusting("Solo", -10, &calls)]);

        let outcome = analyzer.analyze(inputs()).await.unwrap();
        match outcome.report {
            AnalysisReport::Hybrid(hybrid) => {
                assert_eq!(
                    hybrid.outcome.final_score,
                    hybrid.outcome.base_score - 10
                );
                assert_eq!(hybrid.summary, "scripted summary");
                assert_eq!(hybrid.adjustment_reasoning, "scripted reasoning");
                assert!(hybrid
                    .audit
                    .math_breakdown
                    .technical_skills
                    .contains("Weight: 40%"));
            }
            other => panic!("expected hybrid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_partial_backend_failure_is_tolerated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![
            ScriptedJudge::reporting("Good", 90, &calls),
            ScriptedJudge::failing("Broken", &calls),
        ]);

        let outcome = analyzer.analyze(inputs()).await.unwrap();
        match outcome.report {
            AnalysisReport::Consensus(consensus) => assert_eq!(consensus.fit_score, 90),
            other => panic!("expected consensus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_all_backends_failing_is_structured_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![
            ScriptedJudge::failing("A", &calls),
            ScriptedJudge::failing("B", &calls),
        ]);

        let result = analyzer.analyze(inputs()).await;
        assert!(matches!(result, Err(EngineError::AllBackendsFailed)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_without_stalling_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![
            ScriptedJudge::reporting("Fast", 80, &calls),
            ScriptedJudge::slow("Glacial", Duration::from_secs(30), &calls),
        ]);

        let outcome = analyzer.analyze(inputs()).await.unwrap();
        match outcome.report {
            AnalysisReport::Consensus(consensus) => assert_eq!(consensus.fit_score, 80),
            other => panic!("expected consensus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cache_prevents_second_judge_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![ScriptedJudge::reporting("Solo", 75, &calls)]);

        let first = analyzer.analyze(inputs()).await.unwrap();
        let second = analyzer.analyze(inputs()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_judge_report_routes_through_single_consensus() {
        // A lone judge asked for an adjustment may still answer with an
        // independent report; accept it via the single-report path.
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = analyzer(vec![ScriptedJudge::reporting("Solo", 64, &calls)]);

        let outcome = analyzer.analyze(inputs()).await.unwrap();
        match outcome.report {
            AnalysisReport::Consensus(consensus) => {
                assert_eq!(consensus.fit_score, 64);
                assert_eq!(consensus.summary, "summary from Solo");
            }
            other => panic!("expected consensus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fit_score_accessor_covers_both_variants() {
        let calls = Arc::new(AtomicUsize::new(0));

        let consensus_analyzer = analyzer(vec![
            ScriptedJudge::reporting("A", 40, &calls),
            ScriptedJudge::reporting("B", 60, &calls),
        ]);
        let outcome = consensus_analyzer.analyze(inputs()).await.unwrap();
        assert_eq!(outcome.report.fit_score(), 50);

        let hybrid_analyzer = analyzer(vec![ScriptedJudge::adjusting("Solo", 0, &calls)]);
        let outcome = hybrid_analyzer.analyze(inputs()).await.unwrap();
        assert_eq!(
            outcome.report.fit_score(),
            match &outcome.report {
                AnalysisReport::Hybrid(hybrid) => hybrid.outcome.final_score,
                _ => unreachable!(),
            }
        );
    }
}
