//! Application instance statistics.
//!
//! The stats endpoint does not use the `{metadata, entity}` envelope; it
//! returns an object keyed by instance index, each entry carrying a state
//! and (for running instances) a `stats` block.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::client::{expect_status, CfClient};
use crate::convert;
use crate::error::{CfError, Result};

/// State of one running (or not) application instance.
///
/// Parsed case-insensitively; unrecognized values map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstanceState {
    Running,
    Starting,
    Stopped,
    Crashed,
    Flapping,
    Down,
    Unknown,
}

impl InstanceState {
    /// Parse a wire state string.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("running") {
            InstanceState::Running
        } else if s.eq_ignore_ascii_case("starting") {
            InstanceState::Starting
        } else if s.eq_ignore_ascii_case("stopped") {
            InstanceState::Stopped
        } else if s.eq_ignore_ascii_case("crashed") {
            InstanceState::Crashed
        } else if s.eq_ignore_ascii_case("flapping") {
            InstanceState::Flapping
        } else if s.eq_ignore_ascii_case("down") {
            InstanceState::Down
        } else {
            InstanceState::Unknown
        }
    }
}

/// A snapshot of one application instance.
///
/// Usage and quota fields are zero for instances that are not running
/// (the Cloud Controller omits the `stats` block for those).
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    /// Instance index within the application.
    pub index: u32,

    /// Current instance state.
    pub state: InstanceState,

    /// Host the instance runs on.
    pub host: Option<String>,

    /// Port the instance is bound to.
    pub port: Option<u16>,

    /// How long the instance has been up.
    pub uptime: Duration,

    /// CPU usage as a fraction of one core.
    pub cpu: f64,

    /// Memory usage in bytes.
    pub memory_usage: u64,

    /// Memory quota in bytes.
    pub memory_quota: u64,

    /// Disk usage in bytes.
    pub disk_usage: u64,

    /// Disk quota in bytes.
    pub disk_quota: u64,
}

fn instance_from_entry(index: u32, entry: &Value) -> Result<Instance> {
    let state = InstanceState::parse(convert::required_str(entry, "state", entry)?);

    let stats = entry.get("stats");
    let usage = stats.and_then(|s| s.get("usage"));

    Ok(Instance {
        index,
        state,
        host: stats.and_then(|s| convert::optional_str(s, "host")),
        port: stats
            .and_then(|s| convert::optional_u64(s, "port"))
            .and_then(|p| u16::try_from(p).ok()),
        uptime: Duration::from_secs(
            stats.and_then(|s| convert::optional_u64(s, "uptime")).unwrap_or(0),
        ),
        cpu: usage.and_then(|u| convert::optional_f64(u, "cpu")).unwrap_or(0.0),
        memory_usage: usage.and_then(|u| convert::optional_u64(u, "mem")).unwrap_or(0),
        memory_quota: stats
            .and_then(|s| convert::optional_u64(s, "mem_quota"))
            .unwrap_or(0),
        disk_usage: usage.and_then(|u| convert::optional_u64(u, "disk")).unwrap_or(0),
        disk_quota: stats
            .and_then(|s| convert::optional_u64(s, "disk_quota"))
            .unwrap_or(0),
    })
}

/// Convert a stats payload into instances ordered by index.
pub(crate) fn instances_from_payload(payload: &str) -> Result<Vec<Instance>> {
    let value = convert::parse(payload)?;
    let map = value
        .as_object()
        .ok_or_else(|| CfError::format("stats payload is not an object", payload))?;

    let mut instances = Vec::with_capacity(map.len());
    for (key, entry) in map {
        let index: u32 = key.parse().map_err(|_| {
            CfError::format(format!("instance index '{key}' is not numeric"), payload)
        })?;
        instances.push(instance_from_entry(index, entry)?);
    }

    instances.sort_by_key(|i| i.index);
    Ok(instances)
}

/// Fetch stats for every instance of an application.
#[tracing::instrument(skip(client))]
pub async fn get_application_instances(
    client: &CfClient,
    app_guid: &str,
) -> Result<Vec<Instance>> {
    let path = format!("v2/apps/{}/stats", urlencoding::encode(app_guid));

    let response = client.get(&path).await?;
    let body = expect_status(response, StatusCode::OK).await?;
    instances_from_payload(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_payload_conversion() {
        let payload = json!({
            "0": {
                "state": "RUNNING",
                "stats": {
                    "host": "10.0.0.1",
                    "port": 61035,
                    "uptime": 5123,
                    "mem_quota": 536870912u64,
                    "disk_quota": 1073741824u64,
                    "usage": { "cpu": 0.25, "mem": 1048576, "disk": 2097152 }
                }
            },
            "1": { "state": "DOWN" }
        })
        .to_string();

        let instances = instances_from_payload(&payload).unwrap();
        assert_eq!(instances.len(), 2);

        let running = &instances[0];
        assert_eq!(running.index, 0);
        assert_eq!(running.state, InstanceState::Running);
        assert_eq!(running.host.as_deref(), Some("10.0.0.1"));
        assert_eq!(running.port, Some(61035));
        assert_eq!(running.uptime, Duration::from_secs(5123));
        assert_eq!(running.cpu, 0.25);
        assert_eq!(running.memory_usage, 1_048_576);
        assert_eq!(running.memory_quota, 536_870_912);

        let down = &instances[1];
        assert_eq!(down.index, 1);
        assert_eq!(down.state, InstanceState::Down);
        assert!(down.host.is_none());
        assert_eq!(down.memory_quota, 0);
    }

    #[test]
    fn test_instances_ordered_by_index() {
        let payload = json!({
            "2": { "state": "RUNNING" },
            "0": { "state": "RUNNING" },
            "1": { "state": "STARTING" }
        })
        .to_string();

        let instances = instances_from_payload(&payload).unwrap();
        let indices: Vec<u32> = instances.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_state_parse_total() {
        assert_eq!(InstanceState::parse("running"), InstanceState::Running);
        assert_eq!(InstanceState::parse("STOPPED"), InstanceState::Stopped);
        assert_eq!(InstanceState::parse("Flapping"), InstanceState::Flapping);
        assert_eq!(InstanceState::parse("sideways"), InstanceState::Unknown);
    }

    #[test]
    fn test_missing_state_fails() {
        let payload = json!({ "0": {} }).to_string();
        assert!(instances_from_payload(&payload).is_err());
    }

    #[test]
    fn test_non_numeric_index_fails() {
        let payload = json!({ "zero": { "state": "RUNNING" } }).to_string();
        assert!(matches!(
            instances_from_payload(&payload).unwrap_err(),
            CfError::Format { .. }
        ));
    }
}
