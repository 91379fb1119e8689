//! # Common Test Utilities
//!
//! Centralizes the integration-test harness: `TestApp` spawns the real
//! server on a random port, configured against an `httpmock::MockServer`
//! that stands in for both external services (the vector index and the
//! completion API).

// Allow unused code because this is a test utility module, and not every
// test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use httpmock::{Method, Mock, MockServer};
use reqwest::Client;
use serde_json::json;
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};
use twinrag_server::{
    config::get_config,
    router::create_router,
    state::{build_app_state, AppState},
};

/// A harness for end-to-end testing of the Axum server.
///
/// Spawns the server on a random available port with a scratch `config.yml`
/// pointing both provider clients at the mock server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();

        let config_dir = tempfile::tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
request_timeout_secs: 5
vector:
  api_url: "{}"
  api_token: "test-token"
completion:
  api_url: "{}"
  api_key: null
  model_name: "mock-chat-model"
"#,
            mock_server.url("/vector"),
            mock_server.url("/v1/chat/completions"),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Registers a mock for the vector index query endpoint returning the
    /// given hits (the value becomes the `result` array).
    pub fn mock_vector_query(&self, hits: serde_json::Value) -> Mock<'_> {
        self.mock_server.mock(|when, then| {
            when.method(Method::POST).path("/vector/query");
            then.status(200).json_body(json!({ "result": hits }));
        })
    }

    /// Registers a mock for the completion endpoint returning one choice
    /// with the given content.
    pub fn mock_completion(&self, content: &str) -> Mock<'_> {
        self.mock_server.mock(|when, then| {
            when.method(Method::POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }));
        })
    }

    /// A retrieval hit in the shape the vector index returns.
    pub fn skills_hit() -> serde_json::Value {
        json!({
            "id": "chunk-skills",
            "score": 0.87,
            "metadata": {
                "title": "Technical Skills",
                "type": "skills",
                "content": "HTML/CSS, MySQL basics, hardware troubleshooting",
                "category": "skills",
                "tags": ["web", "databases"]
            }
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
