pub mod github;
pub mod inputs;
pub mod report;

pub use github::{ProfileSummary, RepoMetadata};
pub use inputs::AnalysisInputs;
pub use report::{ConsensusReport, EvidenceBundle, LabeledReport, Report};
