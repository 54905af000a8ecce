//! Cloud Foundry v2 API client library.
//!
//! A Rust library for interacting with the Cloud Foundry v2 REST API using
//! a trait-based architecture where each operation (Get, List, Update) is
//! defined as a trait that resource types implement. Payload conversion is
//! fail-fast: every required field of the `{metadata, entity}` envelope is
//! validated, and partial objects are never produced.
//!
//! # Quick Start
//!
//! ```no_run
//! use cfapi::{CfCredentials, CloudFoundry};
//!
//! #[tokio::main]
//! async fn main() -> cfapi::Result<()> {
//!     // Create client from environment variables
//!     let cf = CloudFoundry::from_env()?;
//!
//!     // Authenticate (OAuth password grant against /oauth/token)
//!     let info = cf.login().await?;
//!     println!("Connected to {}", info.name);
//!
//!     // List applications
//!     for app in cf.applications().await? {
//!         println!("{}: {} x{}", app.name, app.state, app.instances);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Three layers, each with one job:
//!
//! - [`CfClient`] - REST dispatch: builds authenticated requests against
//!   the fixed v2 endpoints and returns raw responses
//! - Operation traits ([`Get`], [`List`], [`Update`]) on resource types -
//!   check the one expected status per operation and convert payloads
//! - [`CloudFoundry`] - the public facade, adding argument validation
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CF_TARGET` (required) - Cloud Controller endpoint
//! - `CF_USERNAME` / `CF_PASSWORD` (required) - password-grant credentials

mod client;
mod cloud_foundry;
mod convert;
mod credentials;
mod error;
mod models;
mod pagination;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{expect_status, CfClient};
pub use cloud_foundry::CloudFoundry;
pub use credentials::CfCredentials;
pub use error::{CfError, Result};
pub use pagination::{Page, PaginationParams};

// Re-export traits
pub use traits::{Get, List, Update};

// Re-export models
pub use models::{
    AppState,
    AppUpdateParams,
    Application,
    Domain,
    Instance,
    InstanceInfo,
    InstanceState,
    Job,
    JobState,
    Organization,
    Route,
    Space,
    User,
};

// Re-export convenience functions
pub use models::{
    bind_route, create_application, create_route, get_application_instances,
    get_application_routes, get_info, scale_application, start_application, stop_application,
    upload_application_bits,
};
