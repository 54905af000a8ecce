//! Trait definitions for Cloud Foundry operations.
//!
//! Each resource type implements the traits its endpoints support,
//! encapsulating endpoint differences in the implementations.

mod get;
mod list;
mod update;

pub use get::Get;
pub use list::List;
pub use update::Update;
