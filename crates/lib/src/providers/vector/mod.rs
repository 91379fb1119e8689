pub mod upstash;

use crate::errors::PipelineError;
use crate::types::RetrievedChunk;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::Deserialize;
use std::fmt::Debug;

/// Summary statistics reported by the vector index, probed once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorIndexInfo {
    pub dimension: u32,
    pub vector_count: u64,
}

/// A trait for querying an external semantic-search index.
///
/// The index is pre-populated by an offline ingestion step; this interface
/// only ever reads from it.
#[async_trait]
pub trait VectorSearchProvider: Send + Sync + Debug + DynClone {
    /// Returns up to `top_k` chunks nearest to `question`, in descending
    /// similarity order, with metadata included. May be empty.
    async fn query(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, PipelineError>;

    /// Fetches index statistics. Used for the startup connectivity probe.
    async fn info(&self) -> Result<VectorIndexInfo, PipelineError>;
}

dyn_clone::clone_trait_object!(VectorSearchProvider);
