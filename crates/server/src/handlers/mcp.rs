//! # JSON-RPC Route Handlers
//!
//! The HTTP face of the JSON-RPC adapter: `POST /api/mcp` carries one
//! JSON-RPC 2.0 request per call, `GET /api/mcp` returns static service
//! metadata without invoking the pipeline.

use crate::{
    rpc::{self, RpcRequest, INVALID_REQUEST},
    state::AppState,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Handler for `POST /api/mcp`.
///
/// JSON-RPC errors are part of the payload, not the transport, so this
/// always answers HTTP 200 with a JSON-RPC response object.
pub async fn mcp_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let request: RpcRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(_) => {
            return Json(rpc::rpc_error(
                Value::Null,
                INVALID_REQUEST,
                "Invalid Request: expected a JSON-RPC 2.0 object",
            ))
        }
    };

    Json(rpc::dispatch(&app_state, request).await)
}

/// Handler for `GET /api/mcp`: static service metadata.
pub async fn mcp_metadata_handler() -> Json<Value> {
    Json(json!({
        "name": "twinrag-server",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "JSON-RPC 2.0",
        "methods": ["ping", "query_digital_twin", "query"],
    }))
}
