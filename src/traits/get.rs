//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;

/// Fetch a single resource by guid.
///
/// Implement this trait for resource types that can be fetched individually
/// by their opaque guid.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Application, Get};
///
/// let client = CfClient::from_env()?;
/// let app = Application::get(&client, "a1b2c3".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this resource (typically a guid String).
    type Id;

    /// Fetch the resource by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Cloud Foundry API client
    /// * `id` - The resource identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call returns an unexpected status
    /// or the payload fails conversion.
    async fn get(client: &CfClient, id: Self::Id) -> Result<Self>;
}
