//! Cloud Controller instance info.
//!
//! The `/info` endpoint is flat JSON, not a `{metadata, entity}` envelope,
//! and is the one call issued without authentication.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::client::{expect_status, CfClient};
use crate::convert;
use crate::error::Result;

/// Descriptive and endpoint information for a Cloud Foundry instance.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceInfo {
    /// The instance name.
    pub name: String,

    /// Build identifier, when reported.
    pub build: Option<String>,

    /// API version, when reported.
    pub version: Option<String>,

    /// The OAuth authorization endpoint used for the token exchange.
    pub authorization_endpoint: String,

    /// The token endpoint, when reported.
    pub token_endpoint: Option<String>,
}

impl InstanceInfo {
    pub(crate) fn from_payload(payload: &str) -> Result<Self> {
        let value = convert::parse(payload)?;

        Ok(Self {
            name: convert::required_str(&value, "name", &value)?.to_string(),
            build: scalar_as_string(&value, "build"),
            version: scalar_as_string(&value, "version"),
            authorization_endpoint: convert::required_str(
                &value,
                "authorization_endpoint",
                &value,
            )?
            .to_string(),
            token_endpoint: convert::optional_str(&value, "token_endpoint"),
        })
    }
}

// The controller reports build and version as either strings or numbers
// depending on release line.
fn scalar_as_string(value: &Value, property: &str) -> Option<String> {
    match value.get(property) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Fetch instance info (unauthenticated).
#[tracing::instrument(skip(client))]
pub async fn get_info(client: &CfClient) -> Result<InstanceInfo> {
    let response = client.get_unauthenticated("info").await?;
    let body = expect_status(response, StatusCode::OK).await?;
    InstanceInfo::from_payload(&body)
}
