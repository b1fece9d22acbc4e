//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod cart;
mod catalog;
pub mod checkout;
mod demo;
pub mod logging;

pub use cart::{CartStore, Rehydration, CART_STORAGE_KEY};
pub use catalog::{CatalogService, CatalogState, CATALOG_FAILURE_MESSAGE};
pub use checkout::{CheckoutForm, CheckoutOutcome, CheckoutService, CheckoutState, DEFAULT_CHECKOUT_DELAY};
pub use demo::DemoService;
pub use logging::{LogEntry, LogEvent, LoggingService};
