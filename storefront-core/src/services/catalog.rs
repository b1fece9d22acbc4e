//! Catalog service - one-shot product load and title search

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Product;
use crate::ports::CatalogProvider;

/// Message shown to the user when the catalog can't be loaded
pub const CATALOG_FAILURE_MESSAGE: &str = "Failed to fetch products";

/// Load state of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Idle,
    Loading,
    Ready(Vec<Product>),
    Failed {
        /// User-facing message
        message: String,
        /// Underlying cause, for logs
        detail: String,
    },
}

impl CatalogState {
    /// True once the load has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self, CatalogState::Ready(_) | CatalogState::Failed { .. })
    }
}

/// Catalog service
///
/// Fetches the product list once. There is no retry: after the first load
/// settles, later calls return the same state.
pub struct CatalogService {
    provider: Arc<dyn CatalogProvider>,
    state: CatalogState,
}

impl CatalogService {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            state: CatalogState::Idle,
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Load the catalog (idle → loading → ready | failed)
    pub async fn load(&mut self) -> &CatalogState {
        if self.state != CatalogState::Idle {
            return &self.state;
        }

        self.state = CatalogState::Loading;
        self.state = match self.provider.fetch_products().await {
            Ok(products) => CatalogState::Ready(products),
            Err(e) => CatalogState::Failed {
                message: CATALOG_FAILURE_MESSAGE.to_string(),
                detail: e.to_string(),
            },
        };
        &self.state
    }

    /// Loaded products; empty unless the load succeeded
    pub fn products(&self) -> &[Product] {
        match &self.state {
            CatalogState::Ready(products) => products,
            _ => &[],
        }
    }

    /// Products whose title contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.title_matches(query))
            .collect()
    }

    pub fn find(&self, product_id: i64) -> Option<&Product> {
        self.products().iter().find(|p| p.id == product_id)
    }

    /// Like [`find`](Self::find), but a missing product is a `NotFound` error
    pub fn require(&self, product_id: i64) -> Result<&Product> {
        self.find(product_id)
            .ok_or_else(|| Error::not_found(format!("Product {}", product_id)))
    }
}
