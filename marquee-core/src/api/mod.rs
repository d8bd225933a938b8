//! Catalog backend access.
//!
//! [`CatalogApi`] is the seam between the orchestrator and the backend: the
//! HTTP client talks to the real service, the in-memory catalog answers the
//! same queries over a fixed item list.

mod http;
mod memory;
pub mod routes;
mod sample;

pub use http::HttpCatalogApi;
pub use memory::{CallKind, InMemoryCatalog};
pub use sample::sample_items;

use async_trait::async_trait;
use marquee_model::MediaPage;

use crate::error::CatalogResult;
use crate::query::ListRequest;

/// Read-only catalog queries.
#[async_trait]
pub trait CatalogApi: Send + Sync + std::fmt::Debug {
    /// Filtered, sorted, paginated listing.
    async fn list(&self, request: &ListRequest) -> CatalogResult<MediaPage>;

    /// Free-text search; `request.query` must be non-empty.
    async fn search(&self, request: &ListRequest) -> CatalogResult<MediaPage>;
}
