//! Integration test harness for Souq.
//!
//! [`TestServer::spawn`] builds the real application, binds it to an
//! ephemeral port on localhost and serves it on a background task. Tests
//! talk to it over HTTP with a cookie-keeping [`reqwest::Client`], one per
//! simulated shopper.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souq-integration-tests
//! ```

use std::net::SocketAddr;

use souq_storefront::{AppState, StorefrontConfig};

/// Admin password used by every test server.
pub const ADMIN_PASSWORD: &str = "integration-secret";

/// A storefront served on a local ephemeral port.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    state: AppState,
}

impl TestServer {
    /// Start a server with no order delay and AI copywriting disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected or the listener
    /// cannot be bound.
    pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let config = StorefrontConfig::from_vars(|key| match key {
            "SOUQ_PORT" => Some("0".to_string()),
            "SOUQ_ORDER_DELAY_MS" => Some("0".to_string()),
            "SOUQ_ADMIN_PASSWORD" => Some(ADMIN_PASSWORD.to_string()),
            _ => None,
        })?;

        let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        let state = AppState::new(config)?;
        let app = souq_storefront::app(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The server's application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }
}

/// A new shopper: an HTTP client with its own cookie jar.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn shopper() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().cookie_store(true).build()
}
