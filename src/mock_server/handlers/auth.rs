//! Info and token-exchange handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// GET /info (unauthenticated)
pub async fn get_info(State(state): State<Arc<RwLock<MockState>>>) -> Response {
    let state = state.read().await;

    Json(json!({
        "name": "mock-cloud-controller",
        "build": "2222",
        "version": 2,
        "authorization_endpoint": state.authorization_endpoint,
        "token_endpoint": state.authorization_endpoint
    }))
    .into_response()
}

/// The OAuth password-grant form.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub grant_type: String,
    #[allow(dead_code)] // Accepted but not verified by the mock
    pub username: Option<String>,
    #[allow(dead_code)]
    pub password: Option<String>,
}

/// POST /oauth/token
///
/// Requires the constant `Basic Y2Y6` client credentials and the
/// password grant type.
pub async fn post_token(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Form(form): Form<TokenForm>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if auth != "Basic Y2Y6" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    if form.grant_type != "password" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unsupported_grant_type" })),
        )
            .into_response();
    }

    let state = state.read().await;
    Json(json!({
        "access_token": state.access_token,
        "token_type": "bearer",
        "expires_in": 600
    }))
    .into_response()
}
