//! Local storage port - string-keyed slots
//!
//! Mirrors the browser's `localStorage`: each key holds one string value.
//! The cart is stored as a JSON array under a single key.

use crate::domain::result::Result;

/// Key-value storage abstraction
pub trait LocalStorage: Send + Sync {
    /// Read a slot. `Ok(None)` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot; no-op if absent
    fn remove_item(&self, key: &str) -> Result<()>;
}
