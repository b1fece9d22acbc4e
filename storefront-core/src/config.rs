//! Configuration management
//!
//! Settings live in `settings.json` in the storefront directory:
//! ```json
//! {
//!   "app": { "demoMode": false },
//!   "catalog": { "url": "https://fakestoreapi.com/products", "timeoutSecs": 30 },
//!   "checkout": { "delayMs": 1000 }
//! }
//! ```
//! Keys the CLI doesn't know about are kept as-is on save. A file that isn't
//! valid JSON is read as defaults but never overwritten.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::fakestore::{DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::services::DEFAULT_CHECKOUT_DELAY;

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    catalog: CatalogSettings,
    #[serde(default)]
    checkout: CheckoutSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delay_ms: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Storefront configuration (resolved view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub catalog_url: String,
    pub catalog_timeout_secs: u64,
    pub checkout_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout_secs: DEFAULT_TIMEOUT_SECS,
            checkout_delay_ms: DEFAULT_CHECKOUT_DELAY.as_millis() as u64,
        }
    }
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true" | "1" | "yes" | "TRUE" | "YES") => Some(true),
        Some("false" | "0" | "no" | "FALSE" | "NO") => Some(false),
        _ => None,
    }
}

/// Raw settings.json text, or `None` if there is no file yet
fn read_settings_text(storefront_dir: &Path) -> Result<Option<String>> {
    let settings_path = storefront_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(None);
    }
    Ok(Some(std::fs::read_to_string(&settings_path)?))
}

impl Config {
    /// Load config from the storefront directory
    ///
    /// Environment overrides (for CI/testing):
    /// - `STOREFRONT_DEMO_MODE` forces demo mode on or off
    /// - `STOREFRONT_CATALOG_URL` replaces the catalog endpoint
    pub fn load(storefront_dir: &Path) -> Result<Self> {
        Self::load_with_env(storefront_dir, |key| std::env::var(key).ok())
    }

    pub(crate) fn load_with_env(
        storefront_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let raw: SettingsFile = match read_settings_text(storefront_dir)? {
            Some(content) => serde_json::from_str(&content).unwrap_or_default(),
            None => SettingsFile::default(),
        };
        let defaults = Config::default();

        let demo_mode =
            parse_flag(env("STOREFRONT_DEMO_MODE").as_deref()).unwrap_or(raw.app.demo_mode);

        let catalog_url = env("STOREFRONT_CATALOG_URL")
            .filter(|url| !url.trim().is_empty())
            .or(raw.catalog.url)
            .unwrap_or(defaults.catalog_url);

        Ok(Self {
            demo_mode,
            catalog_url,
            catalog_timeout_secs: raw
                .catalog
                .timeout_secs
                .unwrap_or(defaults.catalog_timeout_secs)
                .max(MIN_TIMEOUT_SECS),
            checkout_delay_ms: raw.checkout.delay_ms.unwrap_or(defaults.checkout_delay_ms),
        })
    }

    /// Save config to the storefront directory
    ///
    /// Only demo mode is managed by the CLI; everything else in the file,
    /// including keys this version doesn't know, is written back unchanged.
    /// Fails without writing if the existing file can't be parsed.
    pub fn save(&self, storefront_dir: &Path) -> Result<()> {
        let mut settings: SettingsFile = match read_settings_text(storefront_dir)? {
            Some(content) => serde_json::from_str(&content).with_context(|| {
                format!("{} is not valid JSON; fix or remove it first", SETTINGS_FILE)
            })?,
            None => SettingsFile::default(),
        };
        settings.app.demo_mode = self.demo_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(storefront_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}
