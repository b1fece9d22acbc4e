//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Fake Store HTTP client for CatalogProvider
//! - Built-in demo catalogue for CatalogProvider
//! - `storage.json` file for LocalStorage
//! - In-memory map for LocalStorage (tests, ephemeral sessions)

pub mod demo;
pub mod fakestore;
pub mod file_storage;
pub mod memory_storage;

#[cfg(test)]
pub mod fakestore_mock;
