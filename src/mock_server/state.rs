//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Cloud Controller.
//! Resources are stored as raw `{metadata, entity}` envelopes
//! (`serde_json::Value`), which is what the SDK consumes off the wire.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Organization envelopes, in listing order.
    pub organizations: Vec<Value>,

    /// Space envelopes, in listing order.
    pub spaces: Vec<Value>,

    /// User envelopes, in listing order.
    pub users: Vec<Value>,

    /// Application envelopes, in listing order.
    pub apps: Vec<Value>,

    /// Route envelopes, in listing order.
    pub routes: Vec<Value>,

    /// Shared domain envelopes, in listing order.
    pub domains: Vec<Value>,

    /// Job envelopes.
    pub jobs: Vec<Value>,

    /// Stats payloads keyed by app guid: `(app_guid, stats)`.
    pub stats: Vec<(String, Value)>,

    /// Route-to-app bindings: `(route_guid, app_guid)`.
    pub route_bindings: Vec<(String, String)>,

    /// The bearer token the server hands out and then requires on v2 calls.
    pub access_token: String,

    /// The server's own base URL, filled in at bind time so `/info` can
    /// point the authorization endpoint back at the server.
    pub authorization_endpoint: String,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            access_token: "mock-access-token".to_string(),
            ..Self::default()
        }
    }

    /// Create state wrapped in `Arc<RwLock>` for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an organization envelope.
    pub fn with_organization(mut self, org: Value) -> Self {
        self.organizations.push(org);
        self
    }

    /// Add a space envelope.
    pub fn with_space(mut self, space: Value) -> Self {
        self.spaces.push(space);
        self
    }

    /// Add a user envelope.
    pub fn with_user(mut self, user: Value) -> Self {
        self.users.push(user);
        self
    }

    /// Add an application envelope.
    pub fn with_app(mut self, app: Value) -> Self {
        self.apps.push(app);
        self
    }

    /// Add a route envelope.
    pub fn with_route(mut self, route: Value) -> Self {
        self.routes.push(route);
        self
    }

    /// Add a shared domain envelope.
    pub fn with_domain(mut self, domain: Value) -> Self {
        self.domains.push(domain);
        self
    }

    /// Add a job envelope.
    pub fn with_job(mut self, job: Value) -> Self {
        self.jobs.push(job);
        self
    }

    /// Add a stats payload for an app.
    pub fn with_stats(mut self, app_guid: &str, stats: Value) -> Self {
        self.stats.push((app_guid.to_string(), stats));
        self
    }

    /// Find a resource envelope by its metadata guid.
    pub fn find<'a>(collection: &'a [Value], guid: &str) -> Option<&'a Value> {
        collection
            .iter()
            .find(|r| r.pointer("/metadata/guid").and_then(Value::as_str) == Some(guid))
    }

    /// Find a mutable resource envelope by its metadata guid.
    pub fn find_mut<'a>(collection: &'a mut [Value], guid: &str) -> Option<&'a mut Value> {
        collection
            .iter_mut()
            .find(|r| r.pointer("/metadata/guid").and_then(Value::as_str) == Some(guid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_add_and_find_app() {
        let state = MockState::new().with_app(Fixtures::app("app-1", "my-app", "STOPPED", 1, 256));

        let app = MockState::find(&state.apps, "app-1");
        assert!(app.is_some());
        assert_eq!(
            app.unwrap().pointer("/entity/name").and_then(Value::as_str),
            Some("my-app")
        );
        assert!(MockState::find(&state.apps, "missing").is_none());
    }

    #[test]
    fn test_find_mut_allows_entity_merge() {
        let mut state =
            MockState::new().with_app(Fixtures::app("app-1", "my-app", "STOPPED", 1, 256));

        let app = MockState::find_mut(&mut state.apps, "app-1").unwrap();
        app["entity"]["instances"] = serde_json::json!(4);

        let app = MockState::find(&state.apps, "app-1").unwrap();
        assert_eq!(app.pointer("/entity/instances").and_then(Value::as_u64), Some(4));
    }
}
