pub mod openai;

use crate::errors::PipelineError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a text-completion service.
///
/// This defines a common interface for generating an answer from a system
/// and user prompt, so the pipeline never depends on a concrete vendor API.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// Returns the raw completion text; the pipeline applies trimming and
    /// the empty-content fallback.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PipelineError>;
}

dyn_clone::clone_trait_object!(CompletionProvider);
