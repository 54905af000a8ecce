//! Route model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::client::{expect_status, CfClient};
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;

/// A Cloud Foundry HTTP route.
///
/// Routes have no name of their own on the wire; the host serves as the
/// name. The owning domain's name is picked up when the Cloud Controller
/// inlines the `domain` relation.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    /// The route guid.
    pub guid: String,

    /// The host segment of the route.
    pub host: String,

    /// The owning domain's name, when inlined in the payload.
    pub domain_name: Option<String>,

    /// When the route was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl Route {
    /// The fully-qualified name: `host.domain`, or just the host when the
    /// domain was not inlined.
    pub fn fqdn(&self) -> String {
        match self.domain_name.as_deref() {
            Some(domain) if !domain.is_empty() => format!("{}.{}", self.host, domain),
            _ => self.host.clone(),
        }
    }
}

impl FromResource for Route {
    fn from_resource(resource: &Value) -> Result<Self> {
        let parts = convert::parts(resource)?;

        // entity.domain is itself a {metadata, entity} envelope when inlined
        let domain_name = parts
            .entity
            .get("domain")
            .and_then(|d| d.get("entity"))
            .and_then(|e| e.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            guid: convert::guid(&parts, resource)?,
            host: convert::required_str(parts.entity, "host", resource)?.to_string(),
            domain_name,
            created_at: convert::created_at(&parts, resource)?,
        })
    }
}

#[async_trait]
impl List for Route {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        super::list_envelope(client, "v2/routes", page, count).await
    }
}

#[derive(Debug, Serialize)]
struct NewRouteParams<'a> {
    host: &'a str,
    domain_guid: &'a str,
    space_guid: &'a str,
}

/// Create a new route on a domain, owned by a space.
#[tracing::instrument(skip(client))]
pub async fn create_route(
    client: &CfClient,
    host: &str,
    domain_guid: &str,
    space_guid: &str,
) -> Result<Route> {
    let params = NewRouteParams {
        host,
        domain_guid,
        space_guid,
    };

    let response = client.post("v2/routes", &params).await?;
    let body = expect_status(response, StatusCode::CREATED).await?;
    convert::single(&body)
}

/// Map a route onto an application.
#[tracing::instrument(skip(client))]
pub async fn bind_route(client: &CfClient, route_guid: &str, app_guid: &str) -> Result<()> {
    let path = format!(
        "v2/routes/{}/apps/{}",
        urlencoding::encode(route_guid),
        urlencoding::encode(app_guid)
    );

    let response = client.put_empty(&path).await?;
    expect_status(response, StatusCode::CREATED).await?;
    Ok(())
}
