//! # Application State
//!
//! Defines the shared application state (`AppState`) and the logic for
//! building it at startup. The state holds the configuration and the one
//! pipeline client shared by every adapter; the provider clients are
//! constructed here and injected, never reached through globals.

use crate::config::AppConfig;
use std::{sync::Arc, time::Duration};
use twinrag::{
    providers::{
        ai::openai::OpenAiCompatProvider,
        vector::{upstash::UpstashVectorProvider, VectorSearchProvider},
    },
    TwinClient, TwinClientBuilder,
};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The question-answering pipeline client shared by all adapters.
    pub twin: Arc<TwinClient>,
}

/// Builds the shared application state from the configuration.
///
/// Instantiates the vector index client and the completion client, probes
/// the index once for connectivity (logging only; a failed probe is not
/// fatal since the index may become reachable later), and wires both into
/// a single `TwinClient`.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let retriever = UpstashVectorProvider::new(
        config.vector.api_url.clone(),
        config.vector.api_token.clone(),
        timeout,
    )?;

    match retriever.info().await {
        Ok(info) => tracing::info!(
            dimension = info.dimension,
            vectors = info.vector_count,
            "Connected to vector index."
        ),
        Err(e) => tracing::warn!("Vector index info probe failed: {e}"),
    }

    let completion_provider = OpenAiCompatProvider::new(
        config.completion.api_url.clone(),
        config.completion.api_key.clone(),
        config.completion.model_name.clone(),
        timeout,
    )?;

    let twin = TwinClientBuilder::new()
        .retriever(Box::new(retriever))
        .completion_provider(Box::new(completion_provider))
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        twin: Arc::new(twin),
    })
}
