//! Space model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::CfClient;
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;

/// A Cloud Foundry space.
///
/// Spaces live inside an organization and scope applications, routes,
/// and service instances.
#[derive(Debug, Clone, Serialize)]
pub struct Space {
    /// The space guid.
    pub guid: String,

    /// The space name.
    pub name: String,

    /// The owning organization guid, when reported.
    pub organization_guid: Option<String>,

    /// When the space was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl FromResource for Space {
    fn from_resource(resource: &Value) -> Result<Self> {
        let parts = convert::parts(resource)?;
        Ok(Self {
            guid: convert::guid(&parts, resource)?,
            name: convert::required_str(parts.entity, "name", resource)?.to_string(),
            organization_guid: convert::optional_str(parts.entity, "organization_guid"),
            created_at: convert::created_at(&parts, resource)?,
        })
    }
}

#[async_trait]
impl List for Space {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        super::list_envelope(client, "v2/spaces", page, count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_resource_with_org() {
        let resource = json!({
            "metadata": { "guid": "space-1" },
            "entity": { "name": "dev", "organization_guid": "org-1" }
        });

        let space = Space::from_resource(&resource).unwrap();
        assert_eq!(space.guid, "space-1");
        assert_eq!(space.name, "dev");
        assert_eq!(space.organization_guid.as_deref(), Some("org-1"));
        assert_eq!(space.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }
}
