//! Cloud Foundry resource model types.

mod application;
mod domain;
mod info;
mod instance;
mod job;
mod organization;
mod route;
mod space;
mod user;

pub use application::*;
pub use domain::*;
pub use info::*;
pub use instance::*;
pub use job::*;
pub use organization::*;
pub use route::*;
pub use space::*;
pub use user::*;

use reqwest::StatusCode;

use crate::client::{expect_status, CfClient};
use crate::convert::{self, FromResource};
use crate::error::Result;
use crate::pagination::{Page, PaginationParams};

/// Fetch one page of a v2 collection endpoint and convert its resources.
pub(crate) async fn list_envelope<T: FromResource>(
    client: &CfClient,
    path: &str,
    page: u32,
    count: u32,
) -> Result<Page<T>> {
    let params = PaginationParams::for_page(page, count);
    let response = client.get_with_query(path, &params).await?;
    let body = expect_status(response, StatusCode::OK).await?;
    let (items, total) = convert::collection_with_total(&body)?;
    Ok(Page::new(items, page, count, total))
}
