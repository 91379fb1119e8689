use crate::types::{ChunkMetadata, RetrievedChunk};
use crate::{
    errors::PipelineError,
    providers::vector::{VectorIndexInfo, VectorSearchProvider},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

// --- Upstash-style REST request and response structures ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct VectorQueryRequest<'a> {
    data: &'a str,
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize, Debug)]
struct VectorQueryResponse {
    result: Vec<VectorMatch>,
}

#[derive(Deserialize, Debug)]
struct VectorMatch {
    score: f64,
    metadata: Option<ChunkMetadata>,
}

#[derive(Deserialize, Debug)]
struct VectorInfoResponse {
    result: RawIndexInfo,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawIndexInfo {
    dimension: u32,
    vector_count: u64,
}

// --- Provider implementation ---

/// A client for an Upstash-style vector index REST API.
///
/// The index embeds the query text server-side, so retrieval is a single
/// `POST {base}/query` call with the raw question as the query signal.
#[derive(Clone, Debug)]
pub struct UpstashVectorProvider {
    client: ReqwestClient,
    base_url: String,
    api_token: Option<String>,
}

impl UpstashVectorProvider {
    /// Creates a new `UpstashVectorProvider`.
    ///
    /// `timeout` bounds each index request; a hung upstream call fails the
    /// request instead of blocking it indefinitely.
    pub fn new(
        base_url: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PipelineError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}/{path}", self.base_url));
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

#[async_trait]
impl VectorSearchProvider for UpstashVectorProvider {
    async fn query(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, PipelineError> {
        let request_body = VectorQueryRequest {
            data: question,
            top_k,
            include_metadata: true,
        };
        debug!(payload = ?request_body, "--> Sending query to vector index");

        let response = self
            .request(reqwest::Method::POST, "query")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::VectorTimeout(e)
                } else {
                    PipelineError::VectorRequest(e)
                }
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PipelineError::VectorApi(error_text));
        }

        let query_response: VectorQueryResponse = response
            .json()
            .await
            .map_err(PipelineError::VectorDeserialization)?;

        let mut chunks: Vec<RetrievedChunk> = query_response
            .result
            .into_iter()
            .map(|hit| RetrievedChunk {
                score: hit.score,
                metadata: hit.metadata.unwrap_or_default(),
            })
            .collect();
        // The index already honors topK; this only guards against a
        // misbehaving upstream.
        chunks.truncate(top_k);
        Ok(chunks)
    }

    async fn info(&self) -> Result<VectorIndexInfo, PipelineError> {
        let response = self
            .request(reqwest::Method::GET, "info")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::VectorTimeout(e)
                } else {
                    PipelineError::VectorRequest(e)
                }
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PipelineError::VectorApi(error_text));
        }

        let info_response: VectorInfoResponse = response
            .json()
            .await
            .map_err(PipelineError::VectorDeserialization)?;

        Ok(VectorIndexInfo {
            dimension: info_response.result.dimension,
            vector_count: info_response.result.vector_count,
        })
    }
}
