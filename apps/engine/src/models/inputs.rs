use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::github::{ProfileSummary, RepoMetadata};

/// The full normalized input tuple for one analysis request.
///
/// This struct is also the cache-key source: it serializes canonically
/// (fixed field order, README map sorted by key), so semantically identical
/// inputs always hash identically and any byte-level difference in any one
/// field produces a different key.
///
/// Empty resume or LinkedIn text is a baseline case, never an error — the
/// scorers degrade to their documented floors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInputs {
    pub job_description: String,
    pub resume_text: String,
    #[serde(default)]
    pub linkedin_text: Option<String>,
    pub profile: ProfileSummary,
    /// Top-ranked repositories, in the caller's ranking order.
    pub repos: Vec<RepoMetadata>,
    /// README text keyed by repository name. BTreeMap keeps map ordering
    /// canonical under serialization.
    #[serde(default)]
    pub readmes: BTreeMap<String, String>,
}

impl AnalysisInputs {
    /// Everything the candidate wrote, concatenated: resume, LinkedIn,
    /// profile bio, and README texts. This is the haystack for the
    /// technical-match and domain-relevance scorers.
    pub fn candidate_corpus(&self) -> String {
        let mut parts: Vec<&str> = vec![self.resume_text.as_str()];
        if let Some(linkedin) = self.linkedin_text.as_deref() {
            parts.push(linkedin);
        }
        if let Some(bio) = self.profile.bio.as_deref() {
            parts.push(bio);
        }
        for readme in self.readmes.values() {
            parts.push(readme);
        }
        parts.join("\n")
    }
}
