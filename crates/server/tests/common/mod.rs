//! # Common Test Utilities
//!
//! `TestApp` spawns the real server on a random port with the sample catalog
//! and a configuration whose only AI provider is an `httpmock::MockServer`
//! speaking the OpenAI-compatible chat API.

// Not every test file uses every helper.
#![allow(unused)]

use abroad_rag_server::{config, router, state::build_app_state, state::AppState};
use abroad_rag_test_utils::CatalogFixture;
use anyhow::Result;
use axum::serve;
use httpmock::{Method, Mock, MockServer};
use reqwest::Client;
use serde_json::json;
use std::{fs, net::SocketAddr, path::PathBuf};
use tokio::{net::TcpListener, task::JoinHandle};

pub const CHAT_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    pub config_path: PathBuf,
    _fixture: CatalogFixture,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with the sample catalog and the default prompts.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_yaml("").await
    }

    /// Spawns the server with `extra_yaml` appended to the generated config.
    pub async fn spawn_with_yaml(extra_yaml: &str) -> Result<Self> {
        let mock_server = MockServer::start();
        let fixture = CatalogFixture::sample()?;
        let config_path = fixture.dir.path().join("config.yml");

        let config_content = format!(
            r#"
port: 0
catalog_path: "{}"
links_path: "{}"
providers:
  gemini_default:
    provider: "local"
    api_url: "{}"
    api_key: null
    model_name: "mock-chat-model"
{extra_yaml}
"#,
            fixture.catalog_path.display(),
            fixture.links_path.display(),
            mock_server.url(CHAT_PATH),
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(&config_path.to_string_lossy()))?;
        let app_state = build_app_state(config).await?;

        Self::spawn_with_state(app_state, mock_server, fixture, config_path).await
    }

    async fn spawn_with_state(
        app_state: AppState,
        mock_server: MockServer,
        fixture: CatalogFixture,
        config_path: PathBuf,
    ) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let router_state = app_state.clone();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(router_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state,
            config_path,
            _fixture: fixture,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Mocks a successful chat completion returning `answer`.
    pub fn mock_answer(&self, answer: &str) -> Mock<'_> {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": answer } }]
        });
        self.mock_server.mock(|when, then| {
            when.method(Method::POST).path(CHAT_PATH);
            then.status(200).json_body(body);
        })
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{path}", self.address))
            .send()
            .await?)
    }

    pub async fn ask(&self, program: &str, question: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/ask", self.address))
            .json(&json!({ "program": program, "question": question }))
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
