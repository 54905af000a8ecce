//! Mock Cloud Controller for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! Cloud Foundry v2 API for integration and end-to-end testing. The server
//! maintains state across requests, enabling realistic workflow testing
//! (login, create, scale, bind, upload) rather than per-endpoint stubbing.
//!
//! # Example
//!
//! ```ignore
//! use cfapi::mock_server::MockServer;
//! use cfapi::{CfCredentials, CloudFoundry};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let creds = CfCredentials::new(server.url(), "admin", "secret").unwrap();
//!     let cf = CloudFoundry::new(creds).unwrap();
//!
//!     // Server comes with default fixtures
//!     cf.login().await.unwrap();
//!     let apps = cf.applications().await.unwrap();
//!     assert!(!apps.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
