//! Pipeline behavior tests with stub providers.
//!
//! These tests substitute in-memory providers for the two external services
//! to pin down the call sequence, short-circuit behavior, prompt contents,
//! and source attribution of `TwinClient::answer`.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use twinrag::constants::{GENERATION_FALLBACK, NO_INFORMATION_FALLBACK};
use twinrag::prompts::OFF_TOPIC_DIRECTIVE;
use twinrag::providers::ai::CompletionProvider;
use twinrag::providers::vector::{VectorIndexInfo, VectorSearchProvider};
use twinrag::{
    Answer, AnswerOptions, ChunkMetadata, Persona, PipelineError, RetrievedChunk, TwinClient,
    TwinClientBuilder,
};

// --- Stub providers ---

#[derive(Clone, Debug)]
struct StubRetriever {
    chunks: Vec<RetrievedChunk>,
    calls: Arc<AtomicUsize>,
}

impl StubRetriever {
    fn new(chunks: Vec<RetrievedChunk>) -> Self {
        Self {
            chunks,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl VectorSearchProvider for StubRetriever {
    async fn query(
        &self,
        _question: &str,
        _top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.chunks.clone())
    }

    async fn info(&self) -> Result<VectorIndexInfo, PipelineError> {
        Ok(VectorIndexInfo {
            dimension: 1536,
            vector_count: self.chunks.len() as u64,
        })
    }
}

#[derive(Clone, Debug)]
struct StubCompletion {
    reply: String,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubCompletion {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn last_prompts(&self) -> (String, String) {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("completion provider was never called")
    }
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        Ok(self.reply.clone())
    }
}

fn make_chunk(title: &str, content: &str, category: &str, score: f64) -> RetrievedChunk {
    RetrievedChunk {
        score,
        metadata: ChunkMetadata {
            title: Some(title.to_string()),
            kind: None,
            content: (!content.is_empty()).then(|| content.to_string()),
            category: Some(category.to_string()),
            tags: Vec::new(),
        },
    }
}

fn build_client(
    retriever: &StubRetriever,
    completion: &StubCompletion,
) -> Result<TwinClient, PipelineError> {
    TwinClientBuilder::new()
        .retriever(Box::new(retriever.clone()))
        .completion_provider(Box::new(completion.clone()))
        .build()
}

async fn answer(client: &TwinClient, question: &str) -> Result<Answer, PipelineError> {
    client.answer(question, &AnswerOptions::default()).await
}

// --- Tests ---

#[tokio::test]
async fn test_greeting_makes_zero_external_calls() -> Result<()> {
    let retriever = StubRetriever::new(vec![make_chunk("a", "x", "c", 0.9)]);
    let completion = StubCompletion::new("should not be used");
    let client = build_client(&retriever, &completion)?;

    let result = answer(&client, "  Hello ").await?;

    assert!(result.sources.is_empty());
    assert!(!result.text.is_empty());
    assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
    assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_retrieval_short_circuits_generation() -> Result<()> {
    let retriever = StubRetriever::new(Vec::new());
    let completion = StubCompletion::new("should not be used");
    let client = build_client(&retriever, &completion)?;

    let result = answer(&client, "What are your hobbies?").await?;

    assert_eq!(result.text, NO_INFORMATION_FALLBACK);
    assert!(result.sources.is_empty());
    assert_eq!(retriever.calls.load(Ordering::SeqCst), 1);
    assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_question_triggers_one_retrieval_and_one_completion() -> Result<()> {
    let retriever = StubRetriever::new(vec![make_chunk(
        "Technical Skills",
        "HTML/CSS, MySQL basics, hardware troubleshooting",
        "skills",
        0.87,
    )]);
    let completion = StubCompletion::new("I work with HTML, CSS, and MySQL.");
    let client = build_client(&retriever, &completion)?;

    let result = answer(&client, "What are your technical skills?").await?;

    assert_eq!(result.text, "I work with HTML, CSS, and MySQL.");
    assert_eq!(retriever.calls.load(Ordering::SeqCst), 1);
    assert_eq!(completion.calls.load(Ordering::SeqCst), 1);

    let (_, user_prompt) = completion.last_prompts();
    assert!(user_prompt
        .contains("Technical Skills: HTML/CSS, MySQL basics, hardware troubleshooting"));
    assert!(user_prompt.contains("What are your technical skills?"));

    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].title, "Technical Skills");
    assert_eq!(result.sources[0].category, "skills");
    assert!((result.sources[0].relevance - 0.87).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_sources_cover_all_chunks_even_without_content() -> Result<()> {
    let retriever = StubRetriever::new(vec![
        make_chunk("Experience", "Two years in IT support.", "experience", 0.8),
        make_chunk("Placeholder", "", "misc", 0.6),
    ]);
    let completion = StubCompletion::new("Here's my experience.");
    let client = build_client(&retriever, &completion)?;

    let result = answer(&client, "Tell me about your experience").await?;

    // Both chunks are attributed, but only one contributed context.
    assert_eq!(result.sources.len(), 2);
    let (_, user_prompt) = completion.last_prompts();
    assert!(user_prompt.contains("Experience: Two years in IT support."));
    assert!(!user_prompt.contains("Placeholder"));
    Ok(())
}

#[tokio::test]
async fn test_all_empty_chunks_still_generate_with_empty_context() -> Result<()> {
    let retriever = StubRetriever::new(vec![
        make_chunk("A", "", "misc", 0.7),
        make_chunk("B", "", "misc", 0.6),
    ]);
    let completion = StubCompletion::new("I don't have details on that.");
    let client = build_client(&retriever, &completion)?;

    let result = answer(&client, "Tell me more").await?;

    assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.sources.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_blank_completion_is_replaced_by_fallback() -> Result<()> {
    let retriever = StubRetriever::new(vec![make_chunk("a", "x", "c", 0.9)]);
    let completion = StubCompletion::new("   \n ");
    let client = build_client(&retriever, &completion)?;

    let result = answer(&client, "What do you do?").await?;

    assert_eq!(result.text, GENERATION_FALLBACK);
    assert_eq!(result.sources.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_low_scores_switch_in_off_topic_framing() -> Result<()> {
    let retriever = StubRetriever::new(vec![
        make_chunk("a", "x", "c", 0.4),
        make_chunk("b", "y", "c", 0.2),
    ]);
    let completion = StubCompletion::new("Let's talk about my background instead.");
    let client = build_client(&retriever, &completion)?;

    answer(&client, "What's the weather like?").await?;

    let (system_prompt, _) = completion.last_prompts();
    assert!(system_prompt.contains(OFF_TOPIC_DIRECTIVE));
    Ok(())
}

#[tokio::test]
async fn test_high_scores_keep_on_topic_framing() -> Result<()> {
    let retriever = StubRetriever::new(vec![make_chunk("a", "x", "c", 0.9)]);
    let completion = StubCompletion::new("Sure.");
    let client = build_client(&retriever, &completion)?;

    answer(&client, "What are your skills?").await?;

    let (system_prompt, _) = completion.last_prompts();
    assert!(!system_prompt.contains(OFF_TOPIC_DIRECTIVE));
    Ok(())
}

#[tokio::test]
async fn test_persona_selects_system_prompt_variant() -> Result<()> {
    let retriever = StubRetriever::new(vec![make_chunk("a", "x", "c", 0.9)]);
    let completion = StubCompletion::new("Sure.");
    let client = build_client(&retriever, &completion)?;

    let casual = AnswerOptions {
        persona: Persona::Casual,
        history: Vec::new(),
    };
    client.answer("What are your skills?", &casual).await?;
    let (casual_system, _) = completion.last_prompts();

    client
        .answer("What are your skills?", &AnswerOptions::default())
        .await?;
    let (professional_system, _) = completion.last_prompts();

    assert_ne!(casual_system, professional_system);
    Ok(())
}

#[tokio::test]
async fn test_identical_inputs_produce_identical_prompts() -> Result<()> {
    let retriever = StubRetriever::new(vec![
        make_chunk("First", "one", "c", 0.9),
        make_chunk("Second", "two", "c", 0.7),
    ]);
    let completion = StubCompletion::new("Answer.");
    let client = build_client(&retriever, &completion)?;

    answer(&client, "Tell me about your projects").await?;
    answer(&client, "Tell me about your projects").await?;

    let prompts = completion.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
    Ok(())
}

#[tokio::test]
async fn test_builder_requires_both_providers() {
    let retriever = StubRetriever::new(Vec::new());

    let missing_completion = TwinClientBuilder::new()
        .retriever(Box::new(retriever.clone()))
        .build();
    assert!(matches!(
        missing_completion,
        Err(PipelineError::MissingCompletionProvider)
    ));

    let missing_retriever = TwinClientBuilder::new()
        .completion_provider(Box::new(StubCompletion::new("x")))
        .build();
    assert!(matches!(
        missing_retriever,
        Err(PipelineError::MissingRetriever)
    ));
}
