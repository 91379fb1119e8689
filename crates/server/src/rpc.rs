//! # JSON-RPC 2.0 Dispatch
//!
//! The method dispatch shared by the HTTP JSON-RPC endpoint and the stdio
//! transport. Both adapters translate their envelope into [`RpcRequest`]
//! and call [`dispatch`], so the pipeline behavior can never diverge
//! between protocols.

use crate::state::AppState;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;
use twinrag::{Answer, AnswerOptions, Persona, PipelineError};

pub const JSONRPC_VERSION: &str = "2.0";

// JSON-RPC 2.0 error codes.
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
pub const PARSE_ERROR: i64 = -32700;

/// An incoming JSON-RPC request with every field optional, so envelope
/// validation happens here rather than in the deserializer.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: Option<String>,
    pub method: Option<String>,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

/// Builds a JSON-RPC success response.
pub fn rpc_result(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC error response.
pub fn rpc_error(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        },
    })
}

/// Runs the pipeline for a JSON-RPC question with the professional persona.
pub async fn answer_question(state: &AppState, question: &str) -> Result<Answer, PipelineError> {
    let options = AnswerOptions {
        persona: Persona::Professional,
        history: Vec::new(),
    };
    state.twin.answer(question, &options).await
}

/// Dispatches one JSON-RPC request to its method handler.
///
/// Supported methods: `ping`, `query_digital_twin`, and its alias `query`.
/// The question may arrive under either a `question` or `query` param key.
pub async fn dispatch(state: &AppState, request: RpcRequest) -> Value {
    let id = request.id.unwrap_or(Value::Null);

    if request.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
        return rpc_error(
            id,
            INVALID_REQUEST,
            "Invalid Request: expected jsonrpc \"2.0\"",
        );
    }

    match request.method.as_deref() {
        Some("ping") => rpc_result(
            id,
            json!({
                "status": "ok",
                "message": "twinrag server is running.",
            }),
        ),
        Some("query_digital_twin") | Some("query") => {
            let question = request
                .params
                .get("question")
                .or_else(|| request.params.get("query"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|q| !q.is_empty());

            let Some(question) = question else {
                return rpc_error(
                    id,
                    INVALID_PARAMS,
                    "Invalid params: a non-empty 'question' is required",
                );
            };

            match answer_question(state, question).await {
                Ok(answer) => rpc_result(
                    id,
                    json!({
                        "answer": answer.text,
                        "sources": answer.sources,
                    }),
                ),
                Err(err) => {
                    error!("JSON-RPC query failed: {err:?}");
                    rpc_error(
                        id,
                        INTERNAL_ERROR,
                        "Internal error while answering the question",
                    )
                }
            }
        }
        Some(other) => rpc_error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        None => rpc_error(id, INVALID_REQUEST, "Invalid Request: missing method"),
    }
}
