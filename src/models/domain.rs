//! Shared domain model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::CfClient;
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;

/// A shared domain available to all organizations.
#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    /// The domain guid.
    pub guid: String,

    /// The domain name (e.g. `apps.example.com`).
    pub name: String,

    /// When the domain was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl FromResource for Domain {
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
impl List for Domain {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        super::list_envelope(client, "v2/shared_domains", page, count).await
    }
}
