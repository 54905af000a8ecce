//! Test data fixtures for the mock server.
//!
//! Provides factory functions that build the raw `{metadata, entity}`
//! envelopes the Cloud Controller serves.

use serde_json::{json, Value};

use super::state::MockState;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Envelope Fixtures
    // =========================================================================

    /// An organization envelope.
    pub fn organization(guid: &str, name: &str) -> Value {
        json!({
            "metadata": { "guid": guid, "created_at": "2014-01-01T00:00:00Z" },
            "entity": { "name": name }
        })
    }

    /// A space envelope.
    pub fn space(guid: &str, name: &str, org_guid: &str) -> Value {
        json!({
            "metadata": { "guid": guid, "created_at": "2014-01-01T00:00:00Z" },
            "entity": { "name": name, "organization_guid": org_guid }
        })
    }

    /// A user envelope.
    pub fn user(guid: &str, username: &str) -> Value {
        json!({
            "metadata": { "guid": guid },
            "entity": { "username": username, "admin": false }
        })
    }

    /// The username-less record the controller emits for its legacy API user.
    pub fn legacy_api_user() -> Value {
        json!({
            "metadata": { "guid": "legacy-api" },
            "entity": {}
        })
    }

    /// An application envelope.
    pub fn app(guid: &str, name: &str, state: &str, instances: u32, memory: u32) -> Value {
        json!({
            "metadata": { "guid": guid, "created_at": "2014-01-01T00:00:00Z" },
            "entity": {
                "name": name,
                "state": state,
                "instances": instances,
                "memory": memory,
                "space_guid": "space-1"
            }
        })
    }

    /// A route envelope with an inlined domain relation.
    pub fn route(guid: &str, host: &str, domain_guid: &str, domain_name: &str) -> Value {
        json!({
            "metadata": { "guid": guid, "created_at": "2014-01-01T00:00:00Z" },
            "entity": {
                "host": host,
                "domain_guid": domain_guid,
                "domain": {
                    "metadata": { "guid": domain_guid },
                    "entity": { "name": domain_name }
                }
            }
        })
    }

    /// A shared domain envelope.
    pub fn shared_domain(guid: &str, name: &str) -> Value {
        json!({
            "metadata": { "guid": guid, "created_at": "2014-01-01T00:00:00Z" },
            "entity": { "name": name }
        })
    }

    /// A job envelope.
    pub fn job(guid: &str, status: &str) -> Value {
        json!({
            "metadata": { "guid": guid, "created_at": "2014-01-01T00:00:00Z" },
            "entity": { "status": status }
        })
    }

    /// A stats payload with one running and one down instance.
    pub fn stats_running_and_down() -> Value {
        json!({
            "0": {
                "state": "RUNNING",
                "stats": {
                    "host": "10.0.0.1",
                    "port": 61035,
                    "uptime": 120,
                    "mem_quota": 536870912u64,
                    "disk_quota": 1073741824u64,
                    "usage": { "cpu": 0.05, "mem": 1048576, "disk": 2097152 }
                }
            },
            "1": { "state": "DOWN" }
        })
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The default scenario: one org/space, two users (one legacy-api),
    /// one stopped app with stats, a shared domain, an unbound route,
    /// and a finished job.
    pub fn default_state() -> MockState {
        MockState::new()
            .with_organization(Self::organization("org-1", "test-org"))
            .with_space(Self::space("space-1", "dev", "org-1"))
            .with_user(Self::user("user-1", "alice"))
            .with_user(Self::legacy_api_user())
            .with_app(Self::app("app-1", "test-app", "STOPPED", 1, 256))
            .with_domain(Self::shared_domain("dom-1", "apps.example.com"))
            .with_route(Self::route("route-1", "test", "dom-1", "apps.example.com"))
            .with_job(Self::job("job-1", "finished"))
            .with_stats("app-1", Self::stats_running_and_down())
    }
}
