//! The single shared context builder used by every judge adapter.
//!
//! Provenance labels never appear here: nothing a judge reads identifies
//! which backend produced any earlier output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::judges::prompts::{ADJUSTMENT_JUDGE_SYSTEM, INDEPENDENT_JUDGE_SYSTEM};
use crate::models::github::{ProfileSummary, RepoMetadata};
use crate::scoring::ScoreBreakdown;

/// READMEs are excerpted, not inlined whole.
const README_EXCERPT_CHARS: usize = 1500;

/// The quantitative evidence shown to a judge in hybrid mode.
#[derive(Debug, Clone, Serialize)]
pub struct QuantitativeSummary {
    pub breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Everything a judge is allowed to see for one analysis request.
///
/// `quantitative` is present exactly when the judge is asked for a bounded
/// adjustment instead of an independent fit score.
#[derive(Debug, Clone)]
pub struct JudgeContext {
    pub profile: ProfileSummary,
    pub repos: Vec<RepoMetadata>,
    pub readmes: BTreeMap<String, String>,
    pub job_description: String,
    pub resume_text: String,
    pub linkedin_text: Option<String>,
    pub quantitative: Option<QuantitativeSummary>,
}

impl JudgeContext {
    pub fn system_prompt(&self) -> &'static str {
        if self.quantitative.is_some() {
            ADJUSTMENT_JUDGE_SYSTEM
        } else {
            INDEPENDENT_JUDGE_SYSTEM
        }
    }

    /// Renders the full user message: JD, resume, LinkedIn, GitHub summary,
    /// and (in hybrid mode) the quantitative scores plus the adjustment
    /// task.
    pub fn user_message(&self) -> String {
        let mut segments = vec![
            format!("--- JOB DESCRIPTION ---\n{}", self.job_description),
            format!("--- RESUME ---\n{}", self.resume_text),
            format!(
                "--- LINKEDIN ---\n{}",
                self.linkedin_text.as_deref().unwrap_or("Not provided")
            ),
            format!("--- GITHUB SUMMARY ---\n{}", self.github_context()),
        ];

        if let Some(quantitative) = &self.quantitative {
            segments.push(format!(
                "--- QUANTITATIVE SCORES ---\n{}",
                serde_json::to_string_pretty(quantitative).unwrap_or_default()
            ));
            segments.push(
                "TASK: Analyze the evidence above. Does the candidate deserve a higher or \
                 lower score than the math suggests? Provide your 'llm_adjustment' and \
                 evidence breakdown."
                    .to_string(),
            );
        }

        segments.join("\n\n")
    }

    fn github_context(&self) -> String {
        let mut context = format!(
            "Bio: {}\nPublic repos: {}\n\nTop repositories (by rank):\n",
            self.profile.bio.as_deref().unwrap_or("Not provided."),
            self.profile.public_repos
        );

        for repo in &self.repos {
            let readme_excerpt: String = self
                .readmes
                .get(&repo.name)
                .map(|r| r.chars().take(README_EXCERPT_CHARS).collect())
                .unwrap_or_else(|| "No README found.".to_string());
            context.push_str(&format!(
                "\n---\nRepo: {}\nPrimary language: {}\nStars: {}\nDescription: {}\nREADME excerpt: {}\n---\n",
                repo.name,
                repo.language.as_deref().unwrap_or("N/A"),
                repo.stargazers_count,
                repo.description.as_deref().unwrap_or("No description."),
                readme_excerpt,
            ));
        }

        context
    }
}
