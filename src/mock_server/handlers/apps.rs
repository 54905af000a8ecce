//! Application endpoint handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::{check_bearer, collection_response, not_found, ListQuery};
use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;

/// Body for POST /v2/apps.
#[derive(Debug, Deserialize)]
pub struct NewAppBody {
    pub name: String,
    pub space_guid: String,
    pub memory: Option<u32>,
    pub instances: Option<u32>,
}

/// Body for PUT /v2/apps/{guid}.
#[derive(Debug, Deserialize)]
pub struct UpdateAppBody {
    pub instances: Option<u32>,
    pub memory: Option<u32>,
    pub state: Option<String>,
}

/// GET /v2/apps
pub async fn list_apps(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    Json(collection_response(&state.apps, &query)).into_response()
}

/// GET /v2/apps/{guid}
pub async fn get_app(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    match MockState::find(&state.apps, &guid) {
        Some(app) => Json(app.clone()).into_response(),
        None => not_found("app", &guid),
    }
}

/// POST /v2/apps
pub async fn create_app(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<NewAppBody>,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    let guid = format!("app-{}", state.apps.len() + 1);
    let mut app = Fixtures::app(
        &guid,
        &body.name,
        "STOPPED",
        body.instances.unwrap_or(1),
        body.memory.unwrap_or(256),
    );
    app["entity"]["space_guid"] = json!(body.space_guid);

    state.apps.push(app.clone());

    (StatusCode::CREATED, Json(app)).into_response()
}

/// PUT /v2/apps/{guid}
pub async fn update_app(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(guid): Path<String>,
    Json(body): Json<UpdateAppBody>,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    match MockState::find_mut(&mut state.apps, &guid) {
        Some(app) => {
            if let Some(instances) = body.instances {
                app["entity"]["instances"] = json!(instances);
            }
            if let Some(memory) = body.memory {
                app["entity"]["memory"] = json!(memory);
            }
            if let Some(ref new_state) = body.state {
                app["entity"]["state"] = json!(new_state);
            }
            Json(app.clone()).into_response()
        }
        None => not_found("app", &guid),
    }
}

/// GET /v2/apps/{guid}/routes
pub async fn app_routes(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(guid): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    if MockState::find(&state.apps, &guid).is_none() {
        return not_found("app", &guid);
    }

    let bound: Vec<Value> = state
        .route_bindings
        .iter()
        .filter(|(_, app_guid)| *app_guid == guid)
        .filter_map(|(route_guid, _)| MockState::find(&state.routes, route_guid).cloned())
        .collect();

    Json(collection_response(&bound, &query)).into_response()
}

/// GET /v2/apps/{guid}/stats
pub async fn app_stats(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    match state.stats.iter().find(|(app_guid, _)| *app_guid == guid) {
        Some((_, stats)) => Json(stats.clone()).into_response(),
        None => not_found("app", &guid),
    }
}

/// PUT /v2/apps/{guid}/bits
///
/// Accepts the multipart upload without inspecting it and returns the
/// asynchronous job tracking it.
pub async fn upload_bits(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(guid): Path<String>,
    _body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    if MockState::find(&state.apps, &guid).is_none() {
        return not_found("app", &guid);
    }

    let job_guid = format!("job-upload-{guid}");
    let job = Fixtures::job(&job_guid, "queued");
    state.jobs.push(job.clone());

    (StatusCode::CREATED, Json(job)).into_response()
}
