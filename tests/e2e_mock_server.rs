//! E2E tests using the mock Cloud Controller.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use cfapi::mock_server::{Fixtures, MockServer, MockState};
use cfapi::{AppState, CfCredentials, CfError, CloudFoundry, InstanceState, JobState};

async fn connect(server: &MockServer) -> CloudFoundry {
    let creds = CfCredentials::new(server.url(), "admin", "secret").unwrap();
    let cf = CloudFoundry::new(creds).unwrap();
    cf.login().await.expect("login failed");
    cf
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Login Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_login_returns_instance_info() {
    let server = MockServer::start().await;
    let creds = CfCredentials::new(server.url(), "admin", "secret").unwrap();
    let cf = CloudFoundry::new(creds).unwrap();

    assert!(cf.client().access_token().is_none());

    let info = cf.login().await.expect("login failed");

    assert_eq!(info.name, "mock-cloud-controller");
    assert!(cf.client().access_token().is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_resource_call_before_login_fails() {
    let server = MockServer::start().await;
    let creds = CfCredentials::new(server.url(), "admin", "secret").unwrap();
    let cf = CloudFoundry::new(creds).unwrap();

    let err = cf.applications().await.unwrap_err();
    assert!(matches!(err, CfError::NotAuthenticated));

    server.shutdown().await;
}

// =============================================================================
// Directory Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_organizations_spaces_and_users() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    let orgs = cf.organizations().await.expect("Failed to list orgs");
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].name, "test-org");

    let spaces = cf.spaces().await.expect("Failed to list spaces");
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0].organization_guid.as_deref(), Some("org-1"));

    let users = cf.users().await.expect("Failed to list users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "alice");

    // The username-less legacy-api record converts using its guid as name
    let legacy = users.iter().find(|u| u.guid == "legacy-api").unwrap();
    assert_eq!(legacy.name, "legacy-api");

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_shared_domains() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    let domains = cf.shared_domains().await.expect("Failed to list domains");
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].name, "apps.example.com");

    server.shutdown().await;
}

// =============================================================================
// Application Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_application_lifecycle_workflow() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    // Step 1: Create an application
    let app = cf
        .create_application("my-app", "space-1", 512, 1)
        .await
        .expect("Failed to create app");
    assert_eq!(app.name, "my-app");
    assert_eq!(app.state, AppState::Stopped);

    // Step 2: Scale it up
    let scaled = cf
        .scale_application(&app.guid, 4)
        .await
        .expect("Failed to scale app");
    assert_eq!(scaled.instances, 4);

    // Step 3: Upload the package bits (returns an async job)
    let job = cf
        .upload_application_bits(&app.guid, vec![0x50, 0x4b, 0x03, 0x04])
        .await
        .expect("Failed to upload bits");
    assert_eq!(job.status, JobState::Queued);

    // Step 4: Poll the job
    let polled = cf.job(&job.guid).await.expect("Failed to get job");
    assert_eq!(polled.guid, job.guid);

    // Step 5: Start the application
    let started = cf
        .start_application(&app.guid)
        .await
        .expect("Failed to start app");
    assert!(started.is_started());

    // Step 6: Verify the change persisted
    let fetched = cf.application(&app.guid).await.expect("Failed to get app");
    assert_eq!(fetched.state, AppState::Started);
    assert_eq!(fetched.instances, 4);

    server.shutdown().await;
}

#[tokio::test]
async fn test_stop_application() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    cf.start_application("app-1").await.expect("start failed");
    let stopped = cf.stop_application("app-1").await.expect("stop failed");
    assert_eq!(stopped.state, AppState::Stopped);

    server.shutdown().await;
}

#[tokio::test]
async fn test_application_not_found() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    let err = cf.application("nonexistent").await.unwrap_err();
    match err {
        CfError::UnexpectedStatus { expected, received, .. } => {
            assert_eq!(expected, 200);
            assert_eq!(received, 404);
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }

    server.shutdown().await;
}

// =============================================================================
// Route Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_create_and_bind_route_workflow() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    // New app starts with no routes
    let before = cf
        .application_routes("app-1")
        .await
        .expect("Failed to list app routes");
    assert!(before.is_empty());

    // Create a route on the shared domain and bind it
    let route = cf
        .create_route("my-host", "dom-1", "space-1")
        .await
        .expect("Failed to create route");
    assert_eq!(route.fqdn(), "my-host.apps.example.com");

    cf.bind_route(&route.guid, "app-1")
        .await
        .expect("Failed to bind route");

    let after = cf
        .application_routes("app-1")
        .await
        .expect("Failed to list app routes");
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].guid, route.guid);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_all_routes() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    let routes = cf.routes().await.expect("Failed to list routes");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].host, "test");
    assert_eq!(routes[0].fqdn(), "test.apps.example.com");

    server.shutdown().await;
}

// =============================================================================
// Instance Stats Tests
// =============================================================================

#[tokio::test]
async fn test_application_instances() {
    let server = MockServer::start().await;
    let cf = connect(&server).await;

    let instances = cf
        .application_instances("app-1")
        .await
        .expect("Failed to get stats");

    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].index, 0);
    assert_eq!(instances[0].state, InstanceState::Running);
    assert_eq!(instances[0].host.as_deref(), Some("10.0.0.1"));
    assert_eq!(instances[1].state, InstanceState::Down);

    server.shutdown().await;
}

// =============================================================================
// Custom State Tests
// =============================================================================

#[tokio::test]
async fn test_custom_state_with_multiple_apps() {
    let state = MockState::new()
        .with_app(Fixtures::app("app-a", "alpha", "STARTED", 2, 512))
        .with_app(Fixtures::app("app-b", "beta", "STOPPED", 1, 256))
        .with_app(Fixtures::app("app-c", "gamma", "STARTED", 8, 1024));

    let server = MockServer::with_state(state).await;
    let cf = connect(&server).await;

    let apps = cf.applications().await.expect("Failed to list apps");
    assert_eq!(apps.len(), 3);

    let started: Vec<_> = apps.iter().filter(|a| a.is_started()).collect();
    assert_eq!(started.len(), 2);

    let gamma = cf.application("app-c").await.expect("Failed to get app");
    assert_eq!(gamma.instances, 8);
    assert_eq!(gamma.memory, 1024);

    server.shutdown().await;
}

#[tokio::test]
async fn test_empty_server_returns_empty_lists() {
    let server = MockServer::start_empty().await;
    let cf = connect(&server).await;

    assert!(cf.organizations().await.unwrap().is_empty());
    assert!(cf.applications().await.unwrap().is_empty());
    assert!(cf.routes().await.unwrap().is_empty());

    server.shutdown().await;
}
