//! List trait for fetching collections of resources.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List resources with pagination support.
///
/// Implement this trait for resource types served by a v2 collection
/// endpoint (`resources` array plus `total_results`).
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Organization, List};
///
/// let client = CfClient::from_env()?;
///
/// // Fetch a single page
/// let page = Organization::list_page(&client, &(), 1, 50).await?;
///
/// // Fetch all pages
/// let orgs = Organization::list_all(&client, &()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters scoping the listing (unit for plain collections,
    /// a parent guid for nested ones).
    type Query: Default + Send + Sync;

    /// List resources matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Cloud Foundry API client
    /// * `query` - Query parameters scoping the listing
    /// * `page` - Page number (1-indexed)
    /// * `count` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload lacks a
    /// `resources` array.
    async fn list_page(
        client: &CfClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>>;

    /// List all resources matching the query (fetches all pages).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &CfClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            let items_count = result.items.len();
            all_items.extend(result.items);

            if !result.has_more || items_count < DEFAULT_PAGE_SIZE as usize {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
