//! Route endpoint handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{check_bearer, collection_response, not_found, ListQuery};
use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;

/// Body for POST /v2/routes.
#[derive(Debug, Deserialize)]
pub struct NewRouteBody {
    pub host: String,
    pub domain_guid: String,
    #[allow(dead_code)] // Accepted but not modeled by the mock
    pub space_guid: String,
}

/// GET /v2/routes
pub async fn list_routes(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    Json(collection_response(&state.routes, &query)).into_response()
}

/// POST /v2/routes
pub async fn create_route(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<NewRouteBody>,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    let domain_name = MockState::find(&state.domains, &body.domain_guid)
        .and_then(|d| d.pointer("/entity/name"))
        .and_then(Value::as_str)
        .unwrap_or("example.com")
        .to_string();

    let guid = format!("route-{}", state.routes.len() + 1);
    let route = Fixtures::route(&guid, &body.host, &body.domain_guid, &domain_name);
    state.routes.push(route.clone());

    (StatusCode::CREATED, Json(route)).into_response()
}

/// PUT /v2/routes/{guid}/apps/{app_guid}
pub async fn bind_route(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((route_guid, app_guid)): Path<(String, String)>,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    if MockState::find(&state.routes, &route_guid).is_none() {
        return not_found("route", &route_guid);
    }
    let Some(app) = MockState::find(&state.apps, &app_guid).cloned() else {
        return not_found("app", &app_guid);
    };

    state.route_bindings.push((route_guid, app_guid));

    (StatusCode::CREATED, Json(app)).into_response()
}
