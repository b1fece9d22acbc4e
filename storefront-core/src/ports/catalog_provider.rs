//! Product catalog provider port
//!
//! Defines the interface for fetching the product list from an external
//! source (the public products API, the built-in demo catalogue, ...).

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Product;

/// Catalog provider trait
///
/// Implementations fetch the full product list in one call. The
/// CatalogService drives the load state machine on top of this without
/// knowing where the products come from.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Provider name (e.g., "fakestore", "demo")
    fn name(&self) -> &str;

    /// Fetch every product
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}
