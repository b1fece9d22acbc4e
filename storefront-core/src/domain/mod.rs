//! Core domain entities
//!
//! Products, the cart, shipping details and order confirmations. These are
//! pure data structures with validation logic - no I/O.

pub mod cart;
mod order;
mod product;
pub mod result;
pub mod shipping;

pub use cart::{Cart, CartItem, CartSummary};
pub use order::OrderConfirmation;
pub use product::Product;
pub use shipping::{validate_shipping, ShippingDetails, ShippingField, ValidationErrors};
