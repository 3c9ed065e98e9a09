//! Data handed over by the profile/repo collaborator.
//!
//! Field names follow the GitHub REST API payloads so the embedding
//! service can deserialize API responses straight into these records.

use serde::{Deserialize, Serialize};

/// Public profile summary for a candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
}

/// Metadata for a single repository, as ranked and supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    /// Declared size in the hosting provider's units (KB for GitHub).
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_metadata_deserializes_from_api_shape() {
        let json = r#"{
            "name": "screener",
            "description": "Candidate screening engine",
            "language": "Rust",
            "stargazers_count": 120,
            "size": 15000,
            "fork": false,
            "has_wiki": true,
            "has_pages": false,
            "default_branch": "main"
        }"#;
        let repo: RepoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "screener");
        assert_eq!(repo.stargazers_count, 120);
        assert!(repo.has_wiki);
        assert!(!repo.fork);
    }

    #[test]
    fn test_repo_metadata_tolerates_sparse_payload() {
        let repo: RepoMetadata = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(repo.description, None);
        assert_eq!(repo.size, 0);
        assert!(!repo.has_pages);
    }
}
