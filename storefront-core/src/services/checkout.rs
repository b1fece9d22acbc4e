//! Checkout - shipping form state and the simulated order submission
//!
//! No order is created or transmitted anywhere. A valid submission waits a
//! fixed delay to stand in for a network round-trip and then returns an
//! [`OrderConfirmation`]. The cart is only cleared once the user
//! acknowledges the confirmation.

use std::time::Duration;

use crate::domain::result::{Error, Result};
use crate::domain::{validate_shipping, OrderConfirmation, ShippingDetails, ShippingField, ValidationErrors};
use crate::services::CartStore;

/// Default simulated submission latency
pub const DEFAULT_CHECKOUT_DELAY: Duration = Duration::from_millis(1000);

/// Lifecycle of a checkout form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Accepting edits and submissions
    Editing,
    /// Simulated submission in flight; further submits are rejected
    Submitting,
    /// Order confirmed; the form is done
    Submitted,
}

/// Shipping form scoped to one checkout
///
/// Errors are replaced wholesale by every validation pass.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    details: ShippingDetails,
    errors: ValidationErrors,
    state: CheckoutState,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutForm {
    /// Empty form
    pub fn new() -> Self {
        Self::with_details(ShippingDetails::default())
    }

    /// Form pre-filled with details
    pub fn with_details(details: ShippingDetails) -> Self {
        Self {
            details,
            errors: ValidationErrors::new(),
            state: CheckoutState::Editing,
        }
    }

    pub fn details(&self) -> &ShippingDetails {
        &self.details
    }

    pub fn field(&self, field: ShippingField) -> &str {
        self.details.get(field)
    }

    /// Update one field. Existing errors stay until the next validation.
    pub fn set_field(&mut self, field: ShippingField, value: impl Into<String>) {
        self.details.set(field, value);
    }

    /// Errors from the most recent validation pass
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Recompute every error; true iff the form is valid
    pub fn validate_form(&mut self) -> bool {
        self.errors = validate_shipping(&self.details);
        self.errors.is_empty()
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Abandon the checkout, discarding any edits. The cart is not touched.
    pub fn cancel(self) {}
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The form has errors; fix them and submit again
    Invalid(ValidationErrors),
    /// The (simulated) order went through
    Confirmed(OrderConfirmation),
}

/// Checkout service
pub struct CheckoutService {
    delay: Duration,
}

impl Default for CheckoutService {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKOUT_DELAY)
    }
}

impl CheckoutService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validate and submit the form for the current cart
    ///
    /// An empty cart or a form that is already submitting/submitted is an
    /// error. Invalid details come back as [`CheckoutOutcome::Invalid`] and
    /// leave the form editable. Once the delay starts it runs to completion.
    pub async fn submit(&self, form: &mut CheckoutForm, cart: &CartStore) -> Result<CheckoutOutcome> {
        match form.state {
            CheckoutState::Editing => {}
            CheckoutState::Submitting => {
                return Err(Error::checkout("Order is already being processed"));
            }
            CheckoutState::Submitted => {
                return Err(Error::checkout("Order has already been placed"));
            }
        }

        if cart.is_empty() {
            return Err(Error::checkout("Your cart is empty"));
        }

        if !form.validate_form() {
            return Ok(CheckoutOutcome::Invalid(form.errors.clone()));
        }

        form.state = CheckoutState::Submitting;
        tokio::time::sleep(self.delay).await;
        form.state = CheckoutState::Submitted;

        Ok(CheckoutOutcome::Confirmed(OrderConfirmation::for_cart(cart.cart())))
    }

    /// The user acknowledged the confirmation: empty the cart
    pub fn confirm_order(&self, cart: &mut CartStore) -> Result<()> {
        cart.clear_cart()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tokio::time::Instant;

    use super::*;
    use crate::adapters::memory_storage::MemoryStorage;
    use crate::domain::Product;

    fn valid_details() -> ShippingDetails {
        ShippingDetails {
            name: "Jane Smith".to_string(),
            address: "1 Main St".to_string(),
            phone: "2345678901".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    fn cart_with_items() -> CartStore {
        let (mut cart, _) = CartStore::load(Arc::new(MemoryStorage::new()));
        let mug = Product::new(1, "Mug", Decimal::new(750, 2));
        cart.add_to_cart(&mug).unwrap();
        cart.add_to_cart(&mug).unwrap();
        cart.add_to_cart(&Product::new(2, "Poster", Decimal::new(10, 0))).unwrap();
        cart
    }

    #[test]
    fn test_validate_form_replaces_errors() {
        let mut form = CheckoutForm::new();
        assert!(!form.validate_form());
        assert_eq!(form.errors().len(), 4);

        form.set_field(ShippingField::Name, "A");
        form.set_field(ShippingField::Address, "B");
        form.set_field(ShippingField::Phone, "12345");
        form.set_field(ShippingField::Email, "x@y.com");
        // Stale errors stay until the next pass
        assert_eq!(form.errors().len(), 4);

        assert!(!form.validate_form());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(ShippingField::Phone), Some("Invalid phone number"));

        form.set_field(ShippingField::Phone, "1234567890");
        assert!(form.validate_form());
        assert!(form.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_invalid_keeps_form_editable() {
        let service = CheckoutService::default();
        let cart = cart_with_items();
        let mut form = CheckoutForm::new();
        form.set_field(ShippingField::Name, "Jane");

        let outcome = service.submit(&mut form, &cart).await.unwrap();

        match outcome {
            CheckoutOutcome::Invalid(errors) => {
                assert!(!errors.contains(ShippingField::Name));
                assert_eq!(errors.len(), 3);
            }
            other => panic!("expected invalid, got {:?}", other),
        }
        assert_eq!(form.state(), CheckoutState::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_then_confirms() {
        let service = CheckoutService::new(Duration::from_millis(1000));
        let cart = cart_with_items();
        let mut form = CheckoutForm::with_details(valid_details());

        let started = Instant::now();
        let outcome = service.submit(&mut form, &cart).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(form.state(), CheckoutState::Submitted);
        match outcome {
            CheckoutOutcome::Confirmed(confirmation) => {
                assert_eq!(confirmation.line_count, 2);
                assert_eq!(confirmation.item_count, 3);
                assert_eq!(confirmation.total, Decimal::new(25, 0));
            }
            other => panic!("expected confirmation, got {:?}", other),
        }
        // Submitting alone does not clear the cart
        assert_eq!(cart.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_twice_is_rejected() {
        let service = CheckoutService::default();
        let cart = cart_with_items();
        let mut form = CheckoutForm::with_details(valid_details());

        service.submit(&mut form, &cart).await.unwrap();
        let second = service.submit(&mut form, &cart).await;

        assert!(matches!(second, Err(Error::Checkout(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_with_empty_cart_is_rejected() {
        let service = CheckoutService::default();
        let (cart, _) = CartStore::load(Arc::new(MemoryStorage::new()));
        let mut form = CheckoutForm::with_details(valid_details());

        let result = service.submit(&mut form, &cart).await;

        assert!(matches!(result, Err(Error::Checkout(ref msg)) if msg == "Your cart is empty"));
        assert_eq!(form.state(), CheckoutState::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_clears_cart() {
        let service = CheckoutService::default();
        let mut cart = cart_with_items();
        let mut form = CheckoutForm::with_details(valid_details());

        service.submit(&mut form, &cart).await.unwrap();
        service.confirm_order(&mut cart).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_cancel_leaves_cart_untouched() {
        let cart = cart_with_items();
        let mut form = CheckoutForm::new();
        form.set_field(ShippingField::Name, "Jane");

        form.cancel();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::new(25, 0));
    }
}
