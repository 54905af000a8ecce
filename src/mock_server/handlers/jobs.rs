//! Job endpoint handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::sync::RwLock;

use super::{check_bearer, not_found};
use crate::mock_server::state::MockState;

/// GET /v2/jobs/{guid}
pub async fn get_job(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Some(denied) = check_bearer(&state, &headers) {
        return denied;
    }

    match MockState::find(&state.jobs, &guid) {
        Some(job) => Json(job.clone()).into_response(),
        None => not_found("job", &guid),
    }
}
