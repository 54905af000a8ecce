//! Organization, space, user, and shared domain listing handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::sync::RwLock;

use super::{check_bearer, collection_response, ListQuery};
use crate::mock_server::state::MockState;

/// GET /v2/organizations
pub async fn list_organizations(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    Json(collection_response(&state.organizations, &query)).into_response()
}

/// GET /v2/spaces
pub async fn list_spaces(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    Json(collection_response(&state.spaces, &query)).into_response()
}

/// GET /v2/users
pub async fn list_users(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    Json(collection_response(&state.users, &query)).into_response()
}

/// GET /v2/shared_domains
pub async fn list_domains(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    Json(collection_response(&state.domains, &query)).into_response()
}
