use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Per-unit fetch failures never surface here; they are logged and the run
/// continues with whatever the remaining units produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every configured source failed to initialize, leaving nothing to
    /// collect from.
    #[error("no usable sources: every configured platform connector failed to initialize")]
    NoUsableSources,

    /// Writing the JSON/CSV artifacts failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing mentions to JSON failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
