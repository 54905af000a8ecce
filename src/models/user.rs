//! User model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::CfClient;
use crate::convert::{self, FromResource};
use crate::error::{CfError, Result};
use crate::pagination::Page;
use crate::traits::List;

/// The guid the Cloud Controller uses for its built-in legacy API user,
/// whose records carry no username.
const LEGACY_API_GUID: &str = "legacy-api";

/// A Cloud Foundry user.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// The user guid.
    pub guid: String,

    /// The username.
    pub name: String,

    /// Whether the user is a Cloud Controller admin, when reported.
    pub admin: Option<bool>,

    /// When the user was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl FromResource for User {
    fn from_resource(resource: &Value) -> Result<Self> {
        let parts = convert::parts(resource)?;
        let guid = convert::guid(&parts, resource)?;

        // TODO: drop the legacy-api bypass once the Cloud Controller stops
        // emitting username-less records for its built-in legacy-api user.
        let name = match convert::optional_str(parts.entity, "username") {
            Some(u) if !u.is_empty() => u,
            _ if guid == LEGACY_API_GUID => guid.clone(),
            _ => {
                return Err(CfError::format(
                    "missing 'username' property",
                    resource.to_string(),
                ))
            }
        };

        Ok(Self {
            guid,
            name,
            admin: parts.entity.get("admin").and_then(Value::as_bool),
            created_at: convert::created_at(&parts, resource)?,
        })
    }
}

#[async_trait]
impl List for User {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        super::list_envelope(client, "v2/users", page, count).await
    }
}
