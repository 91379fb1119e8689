use thiserror::Error;

/// Custom error types for the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the vector index: {0}")]
    VectorRequest(reqwest::Error),
    #[error("Vector index request timed out: {0}")]
    VectorTimeout(reqwest::Error),
    #[error("Failed to deserialize vector index response: {0}")]
    VectorDeserialization(reqwest::Error),
    #[error("Vector index returned an error: {0}")]
    VectorApi(String),
    #[error("Failed to send request to the completion service: {0}")]
    AiRequest(reqwest::Error),
    #[error("Completion request timed out: {0}")]
    AiTimeout(reqwest::Error),
    #[error("Failed to deserialize completion service response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("Completion service returned an error: {0}")]
    AiApi(String),
    #[error("Vector search provider is missing")]
    MissingRetriever,
    #[error("Completion provider is missing")]
    MissingCompletionProvider,
}

impl PipelineError {
    /// True for errors caused by an upstream call exceeding its deadline.
    /// Adapters map these to a retryable response instead of a plain
    /// internal error.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            PipelineError::VectorTimeout(_) | PipelineError::AiTimeout(_)
        )
    }
}
