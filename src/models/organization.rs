//! Organization model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::CfClient;
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;

/// A Cloud Foundry organization.
///
/// Organizations are the top-level grouping for spaces, users, and
/// applications on a Cloud Foundry instance.
#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    /// The organization guid.
    pub guid: String,

    /// The organization name.
    pub name: String,

    /// When the organization was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl FromResource for Organization {
    fn from_resource(resource: &Value) -> Result<Self> {
        let parts = convert::parts(resource)?;
        Ok(Self {
            guid: convert::guid(&parts, resource)?,
            name: convert::required_str(parts.entity, "name", resource)?.to_string(),
            created_at: convert::created_at(&parts, resource)?,
        })
    }
}

#[async_trait]
impl List for Organization {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        super::list_envelope(client, "v2/organizations", page, count).await
    }
}
