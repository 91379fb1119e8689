//! # stdio JSON-RPC Transport
//!
//! A newline-delimited JSON-RPC variant of the same dispatch, for
//! process-to-process integration with assistant hosts that spawn the
//! server and speak over stdin/stdout. One request per input line, one
//! response per output line; diagnostics go to stderr via `tracing` so the
//! response stream stays clean.
//!
//! On top of the shared method set this transport supports the handshake
//! and tool-discovery convention (`initialize`, `tools/list`, `tools/call`)
//! so hosts can find and invoke the `query_digital_twin` tool dynamically.

use crate::rpc::{
    self, RpcRequest, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, PARSE_ERROR,
};
use crate::state::AppState;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::error;

const PROTOCOL_VERSION: &str = "2024-11-05";
const TOOL_NAME: &str = "query_digital_twin";

/// Runs the stdio transport until stdin closes.
pub async fn run_stdio(state: AppState) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line).await? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some(response) = handle_line(&state, &line).await else {
            continue;
        };

        stdout.write_all(response.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Handles one input line and returns the response object, or `None` for
/// notifications (requests without an `id`), which get no reply.
pub async fn handle_line(state: &AppState, line: &str) -> Option<Value> {
    let message: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(_) => return Some(rpc::rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
    };

    if !message.is_object() {
        return Some(rpc::rpc_error(
            Value::Null,
            INVALID_REQUEST,
            "Invalid Request: expected a JSON-RPC 2.0 object",
        ));
    }

    // Notifications carry no id and expect no response.
    let id = message.get("id")?.clone();
    let method = message.get("method").and_then(Value::as_str).unwrap_or("");

    match method {
        "initialize" => Some(rpc::rpc_result(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": { "listChanged": false } },
                "serverInfo": {
                    "name": "twinrag-server",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        )),
        "tools/list" => Some(rpc::rpc_result(
            id,
            json!({
                "tools": [{
                    "name": TOOL_NAME,
                    "description": "Ask a question about Christian's professional background, skills, projects, and experience.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "question": {
                                "type": "string",
                                "description": "The question to ask.",
                            },
                        },
                        "required": ["question"],
                    },
                }],
            }),
        )),
        "tools/call" => {
            let params = message.get("params").cloned().unwrap_or(json!({}));
            Some(handle_tool_call(state, id, &params).await)
        }
        _ => {
            // Everything else goes through the shared dispatch, which also
            // owns envelope validation and the unknown-method error.
            let request: RpcRequest = serde_json::from_value(message).ok()?;
            Some(rpc::dispatch(state, request).await)
        }
    }
}

async fn handle_tool_call(state: &AppState, id: Value, params: &Value) -> Value {
    let tool = params.get("name").and_then(Value::as_str).unwrap_or("");
    if tool != TOOL_NAME {
        return rpc::rpc_error(id, INVALID_PARAMS, format!("Unknown tool: {tool}"));
    }

    let question = params
        .get("arguments")
        .and_then(|args| args.get("question"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let Some(question) = question else {
        return rpc::rpc_error(
            id,
            INVALID_PARAMS,
            "Invalid params: a non-empty 'question' is required",
        );
    };

    match rpc::answer_question(state, question).await {
        Ok(answer) => rpc::rpc_result(
            id,
            json!({
                "content": [{ "type": "text", "text": answer.text }],
                "isError": false,
            }),
        ),
        Err(err) => {
            error!("tools/call failed: {err:?}");
            rpc::rpc_error(
                id,
                INTERNAL_ERROR,
                "Internal error while answering the question",
            )
        }
    }
}
