//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod catalog_provider;
mod storage;

pub use catalog_provider::CatalogProvider;
pub use storage::LocalStorage;
