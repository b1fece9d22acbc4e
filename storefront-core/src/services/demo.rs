//! Demo service - manage demo mode
//!
//! Demo mode serves a built-in catalog instead of calling the products API
//! and keeps its cart in a separate `demo-storage.json`, so trying things
//! out never touches the real cart.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::adapters::file_storage::DEMO_STORAGE_FILE;
use crate::config::Config;

/// Demo service for managing demo mode
pub struct DemoService {
    storefront_dir: PathBuf,
}

impl DemoService {
    pub fn new(storefront_dir: &Path) -> Self {
        Self {
            storefront_dir: storefront_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.storefront_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode, starting from an empty demo cart
    pub fn enable(&self) -> Result<()> {
        let mut config = Config::load(&self.storefront_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.storefront_dir)?;

        self.remove_demo_storage()
    }

    /// Disable demo mode
    ///
    /// With `clean`, the demo cart is deleted as well.
    pub fn disable(&self, clean: bool) -> Result<()> {
        let mut config = Config::load(&self.storefront_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.storefront_dir)?;

        if clean {
            self.remove_demo_storage()?;
        }
        Ok(())
    }

    fn remove_demo_storage(&self) -> Result<()> {
        let demo_storage = self.storefront_dir.join(DEMO_STORAGE_FILE);
        if demo_storage.exists() {
            std::fs::remove_file(&demo_storage)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_enable_then_disable() {
        let dir = tempdir().unwrap();
        let service = DemoService::new(dir.path());

        service.enable().unwrap();
        let config = Config::load_with_env(dir.path(), |_| None).unwrap();
        assert!(config.demo_mode);

        service.disable(false).unwrap();
        let config = Config::load_with_env(dir.path(), |_| None).unwrap();
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_enable_resets_demo_cart() {
        let dir = tempdir().unwrap();
        let demo_storage = dir.path().join(DEMO_STORAGE_FILE);
        std::fs::write(&demo_storage, r#"{"cart":"[]"}"#).unwrap();

        DemoService::new(dir.path()).enable().unwrap();

        assert!(!demo_storage.exists());
    }

    #[test]
    fn test_disable_clean_removes_demo_cart_only() {
        let dir = tempdir().unwrap();
        let live_storage = dir.path().join("storage.json");
        let demo_storage = dir.path().join(DEMO_STORAGE_FILE);
        std::fs::write(&live_storage, "{}").unwrap();
        std::fs::write(&demo_storage, "{}").unwrap();

        DemoService::new(dir.path()).disable(true).unwrap();

        assert!(live_storage.exists());
        assert!(!demo_storage.exists());
    }

    #[test]
    fn test_enable_with_malformed_settings_changes_nothing() {
        let dir = tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        let demo_storage = dir.path().join(DEMO_STORAGE_FILE);
        std::fs::write(&settings, "not json").unwrap();
        std::fs::write(&demo_storage, r#"{"cart":"[]"}"#).unwrap();

        assert!(DemoService::new(dir.path()).enable().is_err());

        assert_eq!(std::fs::read_to_string(&settings).unwrap(), "not json");
        assert!(demo_storage.exists());
    }
}
