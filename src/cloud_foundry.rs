//! High-level Cloud Foundry client.
//!
//! The public facade: validates caller-supplied arguments, then delegates
//! to the operation layer. All dependencies are constructor-supplied.

use crate::client::CfClient;
use crate::credentials::CfCredentials;
use crate::error::{CfError, Result};
use crate::models::{
    self, Application, Domain, Instance, InstanceInfo, Job, Organization, Route, Space, User,
};
use crate::traits::{Get, List};

/// High-level client for a Cloud Foundry v2 instance.
///
/// Wraps a [`CfClient`] with argument validation. Invalid arguments fail
/// with [`CfError::InvalidArgument`] before any network call is made.
///
/// # Example
///
/// ```no_run
/// use cfapi::{CfCredentials, CloudFoundry};
///
/// # async fn example() -> cfapi::Result<()> {
/// let creds = CfCredentials::new("https://api.cf.example.com", "admin", "secret")?;
/// let cf = CloudFoundry::new(creds)?;
/// cf.login().await?;
///
/// for app in cf.applications().await? {
///     println!("{} ({} instances)", app.name, app.instances);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CloudFoundry {
    client: CfClient,
}

impl CloudFoundry {
    /// Create a client for the given credentials.
    pub fn new(credentials: CfCredentials) -> Result<Self> {
        Ok(Self {
            client: CfClient::new(credentials)?,
        })
    }

    /// Create a client from the `CF_TARGET`/`CF_USERNAME`/`CF_PASSWORD`
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: CfClient::from_env()?,
        })
    }

    /// Wrap an already-constructed low-level client.
    pub fn with_client(client: CfClient) -> Self {
        Self { client }
    }

    /// The underlying low-level client.
    pub fn client(&self) -> &CfClient {
        &self.client
    }

    /// Authenticate against the instance.
    ///
    /// Fetches `/info` to discover the authorization endpoint, then runs
    /// the OAuth password grant and stores the bearer token for subsequent
    /// calls. Returns the instance info.
    pub async fn login(&self) -> Result<InstanceInfo> {
        let info = models::get_info(&self.client).await?;
        self.client
            .token_exchange(&info.authorization_endpoint)
            .await?;
        Ok(info)
    }

    /// Fetch instance info without authenticating.
    pub async fn info(&self) -> Result<InstanceInfo> {
        models::get_info(&self.client).await
    }

    /// List all organizations.
    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        Organization::list_all(&self.client, &()).await
    }

    /// List all spaces.
    pub async fn spaces(&self) -> Result<Vec<Space>> {
        Space::list_all(&self.client, &()).await
    }

    /// List all users.
    pub async fn users(&self) -> Result<Vec<User>> {
        User::list_all(&self.client, &()).await
    }

    /// List all applications.
    pub async fn applications(&self) -> Result<Vec<Application>> {
        Application::list_all(&self.client, &()).await
    }

    /// Get one application by guid.
    pub async fn application(&self, guid: &str) -> Result<Application> {
        require_id(guid, "application guid")?;
        Application::get(&self.client, guid.to_string()).await
    }

    /// Create an application in a space.
    pub async fn create_application(
        &self,
        name: &str,
        space_guid: &str,
        memory: u32,
        instances: u32,
    ) -> Result<Application> {
        require_id(name, "application name")?;
        require_id(space_guid, "space guid")?;
        models::create_application(&self.client, name, space_guid, memory, instances).await
    }

    /// Change the requested instance count of an application.
    ///
    /// `instances` is signed so a negative count can be rejected here
    /// rather than on the wire.
    pub async fn scale_application(&self, guid: &str, instances: i32) -> Result<Application> {
        require_id(guid, "application guid")?;
        if instances < 0 {
            return Err(CfError::InvalidArgument(format!(
                "instance count must be non-negative, got {instances}"
            )));
        }
        models::scale_application(&self.client, guid, instances as u32).await
    }

    /// Request that an application be started.
    pub async fn start_application(&self, guid: &str) -> Result<Application> {
        require_id(guid, "application guid")?;
        models::start_application(&self.client, guid).await
    }

    /// Request that an application be stopped.
    pub async fn stop_application(&self, guid: &str) -> Result<Application> {
        require_id(guid, "application guid")?;
        models::stop_application(&self.client, guid).await
    }

    /// List the routes mapped to an application.
    pub async fn application_routes(&self, guid: &str) -> Result<Vec<Route>> {
        require_id(guid, "application guid")?;
        models::get_application_routes(&self.client, guid).await
    }

    /// Fetch per-instance stats for an application.
    pub async fn application_instances(&self, guid: &str) -> Result<Vec<Instance>> {
        require_id(guid, "application guid")?;
        models::get_application_instances(&self.client, guid).await
    }

    /// Upload application package bits; returns the job tracking the upload.
    pub async fn upload_application_bits(&self, guid: &str, package: Vec<u8>) -> Result<Job> {
        require_id(guid, "application guid")?;
        if package.is_empty() {
            return Err(CfError::InvalidArgument("package is empty".into()));
        }
        models::upload_application_bits(&self.client, guid, package).await
    }

    /// List all routes.
    pub async fn routes(&self) -> Result<Vec<Route>> {
        Route::list_all(&self.client, &()).await
    }

    /// Create a route on a domain, owned by a space.
    pub async fn create_route(
        &self,
        host: &str,
        domain_guid: &str,
        space_guid: &str,
    ) -> Result<Route> {
        require_id(host, "route host")?;
        require_id(domain_guid, "domain guid")?;
        require_id(space_guid, "space guid")?;
        models::create_route(&self.client, host, domain_guid, space_guid).await
    }

    /// Map a route onto an application.
    pub async fn bind_route(&self, route_guid: &str, app_guid: &str) -> Result<()> {
        require_id(route_guid, "route guid")?;
        require_id(app_guid, "application guid")?;
        models::bind_route(&self.client, route_guid, app_guid).await
    }

    /// List all shared domains.
    pub async fn shared_domains(&self) -> Result<Vec<Domain>> {
        Domain::list_all(&self.client, &()).await
    }

    /// Get one asynchronous job by guid.
    pub async fn job(&self, guid: &str) -> Result<Job> {
        require_id(guid, "job guid")?;
        Job::get(&self.client, guid.to_string()).await
    }
}

fn require_id(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CfError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}
