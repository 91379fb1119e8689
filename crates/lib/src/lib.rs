//! # Profile Question Answering
//!
//! This crate provides a client that answers free-text questions about one
//! person's professional profile. It retrieves the most relevant pre-indexed
//! profile chunks from an external vector index, assembles a bounded context,
//! and generates a persona-constrained answer through an external completion
//! service. Every protocol adapter calls the same [`TwinClient::answer`]
//! function; only the persona variant differs per entry point.

pub mod constants;
pub mod context;
pub mod errors;
pub mod greeting;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::PipelineError;
pub use prompts::Persona;
pub use types::{
    Answer, AnswerOptions, ChatRole, ChatTurn, ChunkMetadata, RetrievedChunk, SourceAttribution,
    TwinClient, TwinClientBuilder,
};

use constants::{GENERATION_FALLBACK, NO_INFORMATION_FALLBACK, TOP_K};
use tracing::{debug, info};

impl TwinClient {
    /// Answers a question about the profile.
    ///
    /// The pipeline runs one pass per call, with no state shared across
    /// requests:
    ///
    /// 1. Greeting shortcut: exact-match pleasantries get a canned reply
    ///    with zero external calls.
    /// 2. Retrieval: one vector index query for the top chunks. An empty
    ///    result short-circuits to a fixed no-information answer without
    ///    invoking the completion service.
    /// 3. Gating: the best similarity score decides the prompt framing
    ///    (on-topic vs. redirect); it never blocks generation.
    /// 4. Context assembly and prompt construction for the selected persona.
    /// 5. One completion call; empty output becomes a fixed fallback string.
    ///
    /// Prior turns in `options.history` are accepted from the caller but not
    /// yet woven into the prompt.
    pub async fn answer(
        &self,
        question: &str,
        options: &AnswerOptions,
    ) -> Result<Answer, PipelineError> {
        if let Some(reply) = greeting::greeting_reply(question) {
            info!("[answer] Greeting shortcut hit, skipping retrieval.");
            return Ok(Answer::canned(reply));
        }

        let chunks = self.retriever.query(question, TOP_K).await?;
        if chunks.is_empty() {
            info!("[answer] Vector index returned no chunks for the question.");
            return Ok(Answer::canned(NO_INFORMATION_FALLBACK));
        }

        let on_topic = context::is_relevant(&chunks);
        let context_block = context::assemble_context(&chunks);
        let sources = context::attribute_sources(&chunks);

        let system_prompt = options.persona.system_prompt(on_topic);
        let user_prompt = prompts::build_user_prompt(&context_block, question);
        debug!(
            persona = ?options.persona,
            on_topic,
            retrieved = chunks.len(),
            prior_turns = options.history.len(),
            "--> Sending prompts to completion provider"
        );

        let raw_answer = self
            .completion_provider
            .complete(&system_prompt, &user_prompt)
            .await?;

        let text = match raw_answer.trim() {
            "" => GENERATION_FALLBACK.to_string(),
            answer => answer.to_string(),
        };

        Ok(Answer { text, sources })
    }
}
