use thiserror::Error;

/// Library-level error type returned by the analysis pipeline.
///
/// Individual judge-backend failures are NOT represented here: they are
/// logged with their label and excluded from aggregation. The pipeline only
/// errors when no usable verdict remains or synthesis itself breaks down.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Every dispatched judge backend failed, timed out, or returned an
    /// unparseable response.
    #[error("no judge backend produced a usable report")]
    AllBackendsFailed,

    /// Zero valid reports to reconcile, or the synthesis collaborator's
    /// output could not be parsed into a consensus report.
    #[error("aggregation failed: {0}")]
    Aggregation(String),

    /// Canonical serialization of the input tuple failed while deriving a
    /// cache key.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
