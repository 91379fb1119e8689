use crate::errors::PipelineError;
use crate::prompts::Persona;
use crate::providers::{ai::CompletionProvider, vector::VectorSearchProvider};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata stored alongside each indexed profile chunk.
///
/// Every field is optional on the wire; the accessor methods apply the
/// documented defaults so call sites never re-invent their own fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ChunkMetadata {
    /// The chunk title, or the empty string when absent.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// The chunk body, or the empty string when absent.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// The chunk category, or `"Unknown"` when absent.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("Unknown")
    }
}

/// One hit from the vector index, in retrieval rank order.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    /// Similarity score, nominally in `[0, 1]`.
    pub score: f64,
    pub metadata: ChunkMetadata,
}

/// Where an answer came from: one record per retrieved chunk, whether or
/// not that chunk contributed text to the prompt context.
#[derive(Debug, Clone, Serialize)]
pub struct SourceAttribution {
    pub title: String,
    pub relevance: f64,
    pub category: String,
}

/// The pipeline's output: generated (or canned) text plus attributions.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceAttribution>,
}

impl Answer {
    /// An answer with no sources, used for greetings and fallbacks.
    pub fn canned(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Speaker of one prior conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior turn supplied by the caller. Conversation memory is owned by
/// the caller; the pipeline receives it but the prompt does not yet use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Per-call options for [`TwinClient::answer`](crate::TwinClient::answer).
#[derive(Debug, Clone, Default)]
pub struct AnswerOptions {
    /// Which persona variant frames the system prompt. Fixed per adapter,
    /// never per request.
    pub persona: Persona,
    /// Prior turns from the caller's conversation, if any.
    pub history: Vec<ChatTurn>,
}

/// A client that answers profile questions by combining a vector index
/// retriever with a completion provider.
pub struct TwinClient {
    pub retriever: Box<dyn VectorSearchProvider>,
    pub completion_provider: Box<dyn CompletionProvider>,
}

impl fmt::Debug for TwinClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwinClient")
            .field("retriever", &self.retriever)
            .field("completion_provider", &self.completion_provider)
            .finish()
    }
}

/// A builder for creating `TwinClient` instances.
///
/// Both providers are injected rather than constructed internally, so tests
/// and alternative deployments can substitute their own implementations.
#[derive(Default)]
pub struct TwinClientBuilder {
    retriever: Option<Box<dyn VectorSearchProvider>>,
    completion_provider: Option<Box<dyn CompletionProvider>>,
}

impl TwinClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vector search provider used for retrieval.
    pub fn retriever(mut self, retriever: Box<dyn VectorSearchProvider>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Sets the completion provider used for answer generation.
    pub fn completion_provider(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.completion_provider = Some(provider);
        self
    }

    /// Builds the `TwinClient`, failing if either provider is missing.
    pub fn build(self) -> Result<TwinClient, PipelineError> {
        Ok(TwinClient {
            retriever: self.retriever.ok_or(PipelineError::MissingRetriever)?,
            completion_provider: self
                .completion_provider
                .ok_or(PipelineError::MissingCompletionProvider)?,
        })
    }
}
