//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;

/// Update an existing resource.
///
/// Implement this trait for resource types that can be modified after
/// creation. Scaling and state changes on applications go through this.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Application, Update, AppUpdateParams};
///
/// let client = CfClient::from_env()?;
/// let scaled = Application::update(
///     &client,
///     "a1b2c3".to_string(),
///     AppUpdateParams {
///         instances: Some(4),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this resource.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the resource and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call returns an unexpected status
    /// or the payload fails conversion.
    async fn update(client: &CfClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
