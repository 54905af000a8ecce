//! Mock Cloud Controller server.
//!
//! Provides an axum-based HTTP server that simulates the Cloud Foundry
//! v2 API.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Cloud Controller for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation, including the login handshake.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        // /info points the token exchange back at this server
        shared_state.write().await.authorization_endpoint = url.clone();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the `CfCredentials` target when testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Info and token exchange
            .route("/info", get(handlers::get_info))
            .route("/oauth/token", post(handlers::post_token))
            // Directory resources
            .route("/v2/organizations", get(handlers::list_organizations))
            .route("/v2/spaces", get(handlers::list_spaces))
            .route("/v2/users", get(handlers::list_users))
            .route("/v2/shared_domains", get(handlers::list_domains))
            // Applications
            .route("/v2/apps", get(handlers::list_apps).post(handlers::create_app))
            .route("/v2/apps/:guid", get(handlers::get_app).put(handlers::update_app))
            .route("/v2/apps/:guid/routes", get(handlers::app_routes))
            .route("/v2/apps/:guid/stats", get(handlers::app_stats))
            .route("/v2/apps/:guid/bits", put(handlers::upload_bits))
            // Routes
            .route("/v2/routes", get(handlers::list_routes).post(handlers::create_route))
            .route("/v2/routes/:guid/apps/:app_guid", put(handlers::bind_route))
            // Jobs
            .route("/v2/jobs/:guid", get(handlers::get_job))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
