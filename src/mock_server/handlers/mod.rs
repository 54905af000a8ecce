//! Endpoint handlers for the mock Cloud Controller.

mod apps;
mod auth;
mod jobs;
mod orgs;
mod routes;

pub use apps::*;
pub use auth::*;
pub use jobs::*;
pub use orgs::*;
pub use routes::*;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::MockState;

/// Pagination query parameters, v2 wire names.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(rename = "results-per-page")]
    pub per_page: Option<u32>,
}

/// Check the bearer token on a v2 resource call.
///
/// Returns the 401 response to send when the header is missing or wrong.
pub(super) fn check_bearer(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    let expected = format!("Bearer {}", state.access_token);
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented == expected {
        return None;
    }

    Some(
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": 10002, "description": "Authentication error" })),
        )
            .into_response(),
    )
}

/// Build a paginated v2 collection envelope.
pub(super) fn collection_response(resources: &[Value], query: &ListQuery) -> Value {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).max(1);

    let total = resources.len();
    let start = (page as u64 - 1).saturating_mul(per_page as u64);
    let items: Vec<Value> = if start < total as u64 {
        let start = start as usize;
        let end = start.saturating_add(per_page as usize).min(total);
        resources[start..end].to_vec()
    } else {
        vec![]
    };

    json!({ "total_results": total, "resources": items })
}

/// A v2-shaped 404 response.
pub(super) fn not_found(what: &str, guid: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": 100004,
            "description": format!("The {what} could not be found: {guid}")
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "i": i })).collect()
    }

    #[test]
    fn test_collection_response_slices_pages() {
        let resources = numbered(5);
        let query = ListQuery {
            page: Some(2),
            per_page: Some(2),
        };
        let body = collection_response(&resources, &query);
        assert_eq!(body["total_results"], 5);
        assert_eq!(body["resources"].as_array().unwrap().len(), 2);
        assert_eq!(body["resources"][0]["i"], 2);
    }

    #[test]
    fn test_collection_response_handles_extreme_page_values() {
        let resources = numbered(3);
        let query = ListQuery {
            page: Some(u32::MAX),
            per_page: Some(u32::MAX),
        };
        let body = collection_response(&resources, &query);
        assert_eq!(body["total_results"], 3);
        assert!(body["resources"].as_array().unwrap().is_empty());
    }
}
