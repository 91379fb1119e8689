//! Relevance gating and prompt-context assembly over retrieval results.

use crate::constants::RELEVANCE_THRESHOLD;
use crate::types::{RetrievedChunk, SourceAttribution};

/// Decides whether a retrieval set looks on-topic.
///
/// Advisory only: the verdict changes the framing embedded in the system
/// prompt and never blocks generation, so a low-scoring but genuinely
/// relevant chunk still reaches the model.
pub fn is_relevant(chunks: &[RetrievedChunk]) -> bool {
    chunks
        .iter()
        .any(|chunk| chunk.score >= RELEVANCE_THRESHOLD)
}

/// Builds the context block fed to the generator.
///
/// Chunks are rendered as `"{label}: {content}"` in retrieval rank order
/// (highest similarity first) and separated by blank lines. The label is
/// the chunk title, falling back to its category. Chunks with no content
/// are skipped here but still appear in the source attributions.
pub fn assemble_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .filter(|chunk| !chunk.metadata.content().is_empty())
        .map(|chunk| {
            let label = match chunk.metadata.title() {
                "" => chunk.metadata.category(),
                title => title,
            };
            format!("{label}: {content}", content = chunk.metadata.content())
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// One attribution per retrieved chunk, content or not.
pub fn attribute_sources(chunks: &[RetrievedChunk]) -> Vec<SourceAttribution> {
    chunks
        .iter()
        .map(|chunk| SourceAttribution {
            title: chunk.metadata.title().to_string(),
            relevance: chunk.score,
            category: chunk.metadata.category().to_string(),
        })
        .collect()
}
