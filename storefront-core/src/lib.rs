//! Storefront Core - Business logic for a local-first storefront
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Product, Cart, ShippingDetails, etc.)
//! - **ports**: Trait definitions for external dependencies (CatalogProvider, LocalStorage)
//! - **services**: Business logic orchestration (cart store, catalog, checkout)
//! - **adapters**: Concrete implementations (Fake Store API, storage.json, etc.)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
pub mod log_migrations;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::demo::DemoCatalogProvider;
use adapters::fakestore::{FakeStoreProvider, UnavailableCatalogProvider};
use adapters::file_storage::{FileStorage, DEMO_STORAGE_FILE, STORAGE_FILE};
use config::Config;
use ports::CatalogProvider;
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    Cart, CartItem, CartSummary, OrderConfirmation, Product,
    ShippingDetails, ShippingField, ValidationErrors,
};
pub use domain::result::{Error, OperationResult};
pub use services::{LogEvent, LoggingService};

/// Main context for storefront operations
///
/// Holds the configuration, the rehydrated cart and the services wired to
/// the right adapters for the current mode.
pub struct StorefrontContext {
    pub config: Config,
    pub cart: CartStore,
    pub rehydration: Rehydration,
    pub catalog: CatalogService,
    pub checkout: CheckoutService,
}

impl StorefrontContext {
    /// Create a new storefront context
    pub fn new(storefront_dir: &Path) -> Result<Self> {
        let config = Config::load(storefront_dir)?;

        // Demo mode keeps its own cart
        let storage_file = if config.demo_mode {
            DEMO_STORAGE_FILE
        } else {
            STORAGE_FILE
        };
        let storage = Arc::new(FileStorage::with_file_name(storefront_dir, storage_file)?);

        let (cart, rehydration) = CartStore::load(storage);

        // A bad catalog endpoint only fails the catalog load
        let provider: Arc<dyn CatalogProvider> = if config.demo_mode {
            Arc::new(DemoCatalogProvider::new())
        } else {
            match FakeStoreProvider::new(&config.catalog_url, config.catalog_timeout_secs) {
                Ok(provider) => Arc::new(provider),
                Err(e) => Arc::new(UnavailableCatalogProvider::new(e)),
            }
        };
        let catalog = CatalogService::new(provider);
        let checkout = CheckoutService::new(config.checkout_delay());

        Ok(Self {
            config,
            cart,
            rehydration,
            catalog,
            checkout,
        })
    }
}
