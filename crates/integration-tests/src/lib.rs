//! Integration tests for the SleepWell storefront.
//!
//! Each test spawns the real application router on an ephemeral port over
//! its own in-memory store, then drives it over HTTP with `reqwest` or with
//! the client crate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sleepwell-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - Endpoint behaviour over raw HTTP
//! - `cart_coordinator` - Cart coordinator against the live API
//! - `checkout` - Checkout flow end to end

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::Value;
use sleepwell_client::ApiClient;
use sleepwell_storefront::config::StorefrontConfig;
use sleepwell_storefront::state::AppState;
use sleepwell_storefront::storage::{MemStorage, Storage};
use tokio::task::JoinHandle;

/// A storefront served on `127.0.0.1` at an ephemeral port.
///
/// The server task is aborted when the value is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub storage: Arc<MemStorage>,
    pub http: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the seeded catalog.
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(MemStorage::seeded().unwrap())).await
    }

    /// Serve the given store.
    pub async fn spawn_with(storage: Arc<MemStorage>) -> Self {
        let config = StorefrontConfig {
            rate_limit: false,
            ..StorefrontConfig::default()
        };
        let shared: Arc<dyn Storage> = storage.clone();
        let app = sleepwell_storefront::app(AppState::new(config, shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Self {
            addr,
            storage,
            http: reqwest::Client::new(),
            handle,
        }
    }

    /// Base URL of the server, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// A client crate API client pointed at this server.
    #[must_use]
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.base_url()).unwrap()
    }

    /// GET `path` and return the status with the JSON body (`Null` if empty).
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self.http.get(self.url(path)).send().await.unwrap();
        read(response).await
    }

    /// Send `body` as JSON with `method` and return the status with the
    /// JSON body (`Null` if empty).
    pub async fn send(&self, method: reqwest::Method, path: &str, body: &Value) -> (u16, Value) {
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        read(response).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
