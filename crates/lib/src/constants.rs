//! Named constants for the query-answering pipeline.

/// Number of chunks requested from the vector index per query.
pub const TOP_K: usize = 3;

/// Minimum best-match similarity score for a retrieval set to count as on-topic.
pub const RELEVANCE_THRESHOLD: f64 = 0.5;

/// Sampling temperature for answer generation.
pub const COMPLETION_TEMPERATURE: f32 = 0.7;

/// Upper bound on generated answer length, in tokens.
pub const COMPLETION_MAX_TOKENS: u32 = 500;

/// Completion model used when the configuration does not name one.
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-8b-instant";

/// Answer returned when the vector index has nothing for the question.
pub const NO_INFORMATION_FALLBACK: &str =
    "I don't have specific information about that topic.";

/// Answer substituted when the completion service returns empty content.
pub const GENERATION_FALLBACK: &str = "Unable to generate response.";
