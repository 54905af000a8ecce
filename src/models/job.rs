//! Asynchronous job model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::client::{expect_status, CfClient};
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::traits::Get;

/// State of an asynchronous Cloud Controller job.
///
/// Parsed case-insensitively; unrecognized values map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Finished,
    Failed,
    Unknown,
}

impl JobState {
    /// Parse a wire state string.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("queued") {
            JobState::Queued
        } else if s.eq_ignore_ascii_case("running") {
            JobState::Running
        } else if s.eq_ignore_ascii_case("finished") {
            JobState::Finished
        } else if s.eq_ignore_ascii_case("failed") {
            JobState::Failed
        } else {
            JobState::Unknown
        }
    }

    /// Whether the job has stopped making progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished | JobState::Failed)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobState::Queued => "queued",
            JobState::Running => "running",
            JobState::Finished => "finished",
            JobState::Failed => "failed",
            JobState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// An asynchronous Cloud Controller job, returned by long-running
/// operations such as the package bits upload.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    /// The job guid.
    pub guid: String,

    /// Current job state.
    pub status: JobState,

    /// When the job was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl FromResource for Job {
    fn from_resource(resource: &Value) -> Result<Self> {
        let parts = convert::parts(resource)?;
        Ok(Self {
            guid: convert::guid(&parts, resource)?,
            status: JobState::parse(convert::required_str(parts.entity, "status", resource)?),
            created_at: convert::created_at(&parts, resource)?,
        })
    }
}

#[async_trait]
impl Get for Job {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, guid: String) -> Result<Self> {
        let path = format!("v2/jobs/{}", urlencoding::encode(&guid));

        let response = client.get(&path).await?;
        let body = expect_status(response, StatusCode::OK).await?;
        convert::single(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_resource() {
        let resource = json!({
            "metadata": { "guid": "job-1" },
            "entity": { "status": "running" }
        });

        let job = Job::from_resource(&resource).unwrap();
        assert_eq!(job.guid, "job-1");
        assert_eq!(job.status, JobState::Running);
        assert!(!job.status.is_terminal());
    }

    #[test]
    fn test_state_parse_case_insensitive_and_total() {
        assert_eq!(JobState::parse("QUEUED"), JobState::Queued);
        assert_eq!(JobState::parse("Finished"), JobState::Finished);
        assert_eq!(JobState::parse("failed"), JobState::Failed);
        assert_eq!(JobState::parse("exploded"), JobState::Unknown);
    }

    #[test]
    fn test_missing_status_fails() {
        let resource = json!({
            "metadata": { "guid": "job-1" },
            "entity": {}
        });
        assert!(Job::from_resource(&resource).is_err());
    }
}
