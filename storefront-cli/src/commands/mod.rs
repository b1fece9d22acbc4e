//! CLI command implementations

pub mod cart;
pub mod checkout;
pub mod demo;
pub mod logs;
pub mod products;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_core::services::{CatalogState, Rehydration};
use storefront_core::{LogEvent, LoggingService, StorefrontContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let storefront_dir = get_storefront_dir().ok()?;
    std::fs::create_dir_all(&storefront_dir).ok()?;
    LoggingService::new(&storefront_dir, "cli", env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the storefront directory from environment or default
pub fn get_storefront_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STOREFRONT_DIR") {
        Ok(PathBuf::from(dir))
    } else {
        dirs::home_dir()
            .map(|home| home.join(".storefront"))
            .ok_or_else(|| anyhow!("Could not find home directory"))
    }
}

/// Get or create storefront context
///
/// A saved cart that couldn't be used is logged and otherwise ignored.
pub fn get_context(logger: &Option<LoggingService>) -> Result<StorefrontContext> {
    let storefront_dir = get_storefront_dir()?;

    std::fs::create_dir_all(&storefront_dir)
        .with_context(|| format!("Failed to create storefront directory: {:?}", storefront_dir))?;

    let ctx = StorefrontContext::new(&storefront_dir)
        .context("Failed to initialize storefront")?;

    if let Rehydration::Discarded(reason) = &ctx.rehydration {
        log_event(
            logger,
            LogEvent::new("saved_cart_discarded").with_error_details(reason.clone()),
        );
    }

    Ok(ctx)
}

/// Run a future to completion on a current-thread runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Spinner shown while something slow runs; hidden when `show` is false
pub fn spinner(message: &str, show: bool) -> Result<ProgressBar> {
    if !show {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Load the catalog, turning a failed load into the user-facing error
pub fn load_catalog(
    ctx: &mut StorefrontContext,
    logger: &Option<LoggingService>,
    show_progress: bool,
) -> Result<()> {
    let pb = spinner("Loading products...", show_progress)?;
    let state = block_on(ctx.catalog.load())?;
    pb.finish_and_clear();

    if let CatalogState::Failed { message, detail } = state {
        log_event(
            logger,
            LogEvent::new("catalog_load_failed")
                .with_error(message.clone())
                .with_error_details(detail.clone()),
        );
        bail!("{}", message);
    }
    Ok(())
}
