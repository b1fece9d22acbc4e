//! Fake Store API client
//!
//! Fetches the product catalog from a public products endpoint that returns
//! a JSON array of products (https://fakestoreapi.com/products by default).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::domain::Product;
use crate::ports::CatalogProvider;

/// Default products endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shortest request timeout a client will use
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Products API client
#[derive(Debug)]
pub struct FakeStoreClient {
    client: Client,
    url: Url,
    timeout_secs: u64,
}

impl FakeStoreClient {
    /// Create a new client for a products endpoint
    ///
    /// Timeouts below [`MIN_TIMEOUT_SECS`] are raised to it.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        let url = parse_catalog_url(url)?;
        let timeout_secs = timeout_secs.max(MIN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url,
            timeout_secs,
        })
    }

    /// Fetch the full product list
    ///
    /// Products that fail validation (e.g. a negative price) are dropped.
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        let response = self
            .client
            .get(self.url.clone())
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        let products: Vec<Product> = response
            .json()
            .await
            .context("Failed to parse products response")?;

        Ok(products
            .into_iter()
            .filter(|p| p.validate().is_ok())
            .collect())
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!("Connection timed out after {} seconds", self.timeout_secs)
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to {}", self.url.host_str().unwrap_or("catalog"))
        } else {
            anyhow::anyhow!("Catalog request failed: {}", error)
        }
    }

    /// Any non-success status is an error
    fn check_response_status(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            anyhow::bail!("HTTP error! status: {}", status.as_u16())
        }
    }
}

/// Parse and check a catalog URL (http or https only)
pub fn parse_catalog_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).context("Invalid URL format")?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => anyhow::bail!("Catalog URL must use HTTP or HTTPS, got '{}'", other),
    }
}

// =============================================================================
// FakeStoreProvider - implements CatalogProvider trait
// =============================================================================

/// HTTP catalog provider
pub struct FakeStoreProvider {
    client: FakeStoreClient,
}

impl FakeStoreProvider {
    pub fn new(url: &str, timeout_secs: u64) -> DomainResult<Self> {
        let client = FakeStoreClient::new(url, timeout_secs)
            .map_err(|e| DomainError::Config(format!("{:#}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogProvider for FakeStoreProvider {
    fn name(&self) -> &str {
        "fakestore"
    }

    async fn fetch_products(&self) -> DomainResult<Vec<Product>> {
        self.client
            .get_products()
            .await
            .map_err(|e| DomainError::Catalog(format!("{:#}", e)))
    }
}

/// Stand-in for a catalog endpoint that could not be set up
///
/// Every fetch reports the setup error, so the catalog settles as failed
/// while the cart and checkout keep working.
pub struct UnavailableCatalogProvider {
    reason: String,
}

impl UnavailableCatalogProvider {
    pub fn new(error: DomainError) -> Self {
        let reason = match error {
            DomainError::Config(reason) => reason,
            other => other.to_string(),
        };
        Self { reason }
    }
}

#[async_trait]
impl CatalogProvider for UnavailableCatalogProvider {
    fn name(&self) -> &str {
        "fakestore"
    }

    async fn fetch_products(&self) -> DomainResult<Vec<Product>> {
        Err(DomainError::Config(self.reason.clone()))
    }
}
