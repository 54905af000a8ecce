//! Application model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::client::{expect_status, CfClient};
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::{Get, List, Update};

use super::job::Job;
use super::route::Route;

/// Requested state of an application.
///
/// Parsed case-insensitively; unrecognized values map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppState {
    Started,
    Stopped,
    Unknown,
}

impl AppState {
    /// Parse a wire state string.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("started") {
            AppState::Started
        } else if s.eq_ignore_ascii_case("stopped") {
            AppState::Stopped
        } else {
            AppState::Unknown
        }
    }

    /// The wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Started => "STARTED",
            AppState::Stopped => "STOPPED",
            AppState::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Cloud Foundry application.
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    /// The application guid.
    pub guid: String,

    /// The application name.
    pub name: String,

    /// Requested state.
    pub state: AppState,

    /// Requested instance count.
    pub instances: u32,

    /// Memory limit per instance, in megabytes.
    pub memory: u32,

    /// The owning space guid, when reported.
    pub space_guid: Option<String>,

    /// When the application was created; epoch-zero when not reported.
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Whether the application is requested to run.
    pub fn is_started(&self) -> bool {
        self.state == AppState::Started
    }

    /// Fetch the routes mapped to this application.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let app = Application::get(&client, guid).await?;
    /// for route in app.routes(&client).await? {
    ///     println!("{}", route.fqdn());
    /// }
    /// ```
    pub async fn routes(&self, client: &CfClient) -> Result<Vec<Route>> {
        get_application_routes(client, &self.guid).await
    }
}

impl FromResource for Application {
    fn from_resource(resource: &Value) -> Result<Self> {
        let parts = convert::parts(resource)?;
        Ok(Self {
            guid: convert::guid(&parts, resource)?,
            name: convert::required_str(parts.entity, "name", resource)?.to_string(),
            state: AppState::parse(convert::required_str(parts.entity, "state", resource)?),
            instances: convert::required_u32(parts.entity, "instances", resource)?,
            memory: convert::required_u32(parts.entity, "memory", resource)?,
            space_guid: convert::optional_str(parts.entity, "space_guid"),
            created_at: convert::created_at(&parts, resource)?,
        })
    }
}

/// Parameters for updating an application (scale, start, stop).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppUpdateParams {
    /// New requested instance count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,

    /// New memory limit per instance, in megabytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,

    /// New requested state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
struct NewAppParams<'a> {
    name: &'a str,
    space_guid: &'a str,
    memory: u32,
    instances: u32,
}

#[async_trait]
impl Get for Application {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, guid: String) -> Result<Self> {
        let path = format!("v2/apps/{}", urlencoding::encode(&guid));

        let response = client.get(&path).await?;
        let body = expect_status(response, StatusCode::OK).await?;
        convert::single(&body)
    }
}

#[async_trait]
impl List for Application {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        super::list_envelope(client, "v2/apps", page, count).await
    }
}

#[async_trait]
impl Update for Application {
    type Id = String;
    type Params = AppUpdateParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &CfClient, guid: String, params: Self::Params) -> Result<Self> {
        let path = format!("v2/apps/{}", urlencoding::encode(&guid));

        let response = client.put(&path, &params).await?;
        let body = expect_status(response, StatusCode::OK).await?;
        convert::single(&body)
    }
}

/// Create a new application in a space.
#[tracing::instrument(skip(client))]
pub async fn create_application(
    client: &CfClient,
    name: &str,
    space_guid: &str,
    memory: u32,
    instances: u32,
) -> Result<Application> {
    let params = NewAppParams {
        name,
        space_guid,
        memory,
        instances,
    };

    let response = client.post("v2/apps", &params).await?;
    let body = expect_status(response, StatusCode::CREATED).await?;
    convert::single(&body)
}

/// Change the requested instance count of an application.
pub async fn scale_application(
    client: &CfClient,
    guid: &str,
    instances: u32,
) -> Result<Application> {
    Application::update(
        client,
        guid.to_string(),
        AppUpdateParams {
            instances: Some(instances),
            ..Default::default()
        },
    )
    .await
}

/// Request that an application be started.
pub async fn start_application(client: &CfClient, guid: &str) -> Result<Application> {
    set_application_state(client, guid, AppState::Started).await
}

/// Request that an application be stopped.
pub async fn stop_application(client: &CfClient, guid: &str) -> Result<Application> {
    set_application_state(client, guid, AppState::Stopped).await
}

async fn set_application_state(
    client: &CfClient,
    guid: &str,
    state: AppState,
) -> Result<Application> {
    Application::update(
        client,
        guid.to_string(),
        AppUpdateParams {
            state: Some(state),
            ..Default::default()
        },
    )
    .await
}

/// Fetch the routes mapped to an application.
#[tracing::instrument(skip(client))]
pub async fn get_application_routes(client: &CfClient, app_guid: &str) -> Result<Vec<Route>> {
    let path = format!("v2/apps/{}/routes", urlencoding::encode(app_guid));

    let response = client.get(&path).await?;
    let body = expect_status(response, StatusCode::OK).await?;
    convert::collection(&body)
}

/// Upload application package bits.
///
/// Sends the documented multipart form (`async`, `resources`, `application`)
/// and returns the asynchronous [`Job`] tracking the upload.
#[tracing::instrument(skip(client, package))]
pub async fn upload_application_bits(
    client: &CfClient,
    app_guid: &str,
    package: Vec<u8>,
) -> Result<Job> {
    let path = format!("v2/apps/{}/bits", urlencoding::encode(app_guid));

    let response = client.upload_bits(&path, package).await?;
    let body = expect_status(response, StatusCode::CREATED).await?;
    convert::single(&body)
}
