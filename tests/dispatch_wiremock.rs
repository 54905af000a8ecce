//! Dispatch-layer tests using wiremock.
//!
//! These pin down the wire behavior: auth headers, expected status codes,
//! and pagination walking.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cfapi::{
    Application, CfClient, CfCredentials, CfError, CloudFoundry, Get, List, Organization,
};

fn client_for(server: &MockServer) -> CfClient {
    let creds = CfCredentials::new(&server.uri(), "admin", "secret").unwrap();
    let client = CfClient::new(creds).unwrap();
    client.set_access_token("test-token");
    client
}

fn org_resource(guid: &str, name: &str) -> Value {
    json!({
        "metadata": { "guid": guid },
        "entity": { "name": name }
    })
}

#[tokio::test]
async fn test_list_sends_bearer_and_pagination_params() {
    let server = MockServer::start().await;

    let response = json!({
        "total_results": 2,
        "resources": [
            org_resource("org-1", "alpha"),
            org_resource("org-2", "beta")
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("page", "1"))
        .and(query_param("results-per-page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = Organization::list_page(&client, &(), 1, 20).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, Some(2));
    assert_eq!(page.items[0].name, "alpha");
    assert_eq!(page.items[1].name, "beta");
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_list_all_walks_pages() {
    let server = MockServer::start().await;

    let full_page: Vec<Value> = (0..100)
        .map(|i| org_resource(&format!("org-{i}"), &format!("org {i}")))
        .collect();
    let last_page: Vec<Value> = (100..150)
        .map(|i| org_resource(&format!("org-{i}"), &format!("org {i}")))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_results": 150,
            "resources": full_page
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_results": 150,
            "resources": last_page
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let orgs = Organization::list_all(&client, &()).await.unwrap();

    assert_eq!(orgs.len(), 150);
    assert_eq!(orgs[0].guid, "org-0");
    assert_eq!(orgs[149].guid, "org-149");
}

#[tokio::test]
async fn test_unexpected_status_carries_received_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 100004,
            "description": "The app could not be found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = Application::get(&client, "missing".to_string()).await.unwrap_err();

    match err {
        CfError::UnexpectedStatus {
            expected,
            received,
            body,
        } => {
            assert_eq!(expected, 200);
            assert_eq!(received, 404);
            assert!(body.contains("could not be found"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_requires_201() {
    let server = MockServer::start().await;

    // A create answered with 200 is a contract violation and must surface
    let app = json!({
        "metadata": { "guid": "app-1" },
        "entity": { "name": "new-app", "state": "STOPPED", "instances": 1, "memory": 256 }
    });

    Mock::given(method("POST"))
        .and(path("/v2/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&app))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = cfapi::create_application(&client, "new-app", "space-1", 256, 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CfError::UnexpectedStatus {
            expected: 201,
            received: 200,
            ..
        }
    ));
}

#[tokio::test]
async fn test_upload_bits_returns_job() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/apps/app-1/bits"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "metadata": { "guid": "job-9" },
            "entity": { "status": "queued" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let job = cfapi::upload_application_bits(&client, "app-1", vec![0x50, 0x4b, 0x03, 0x04])
        .await
        .unwrap();

    assert_eq!(job.guid, "job-9");
    assert_eq!(job.status, cfapi::JobState::Queued);
}

#[tokio::test]
async fn test_login_handshake() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vcap",
            "authorization_endpoint": server.uri()
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("authorization", "Basic Y2Y6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "wire-token",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = CfCredentials::new(&server.uri(), "admin", "secret").unwrap();
    let cf = CloudFoundry::new(creds).unwrap();

    let info = cf.login().await.unwrap();
    assert_eq!(info.name, "vcap");
    assert_eq!(cf.client().access_token().as_deref(), Some("wire-token"));
}

#[tokio::test]
async fn test_login_rejected_token_response_without_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vcap",
            "authorization_endpoint": server.uri()
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let creds = CfCredentials::new(&server.uri(), "admin", "secret").unwrap();
    let cf = CloudFoundry::new(creds).unwrap();

    let err = cf.login().await.unwrap_err();
    match err {
        CfError::Format { message, .. } => assert!(message.contains("access_token")),
        other => panic!("expected Format error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_collection_payload_is_format_error() {
    let server = MockServer::start().await;

    // 200 with a payload that lacks the resources array
    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_results": 0 })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = Organization::list_page(&client, &(), 1, 20).await.unwrap_err();

    match err {
        CfError::Format { message, payload } => {
            assert!(message.contains("'resources'"));
            assert!(payload.contains("total_results"));
        }
        other => panic!("expected Format error, got {other:?}"),
    }
}
