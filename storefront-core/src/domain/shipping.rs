//! Shipping details and checkout form validation

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Ten or more ASCII digits and nothing else
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,}$").unwrap());

/// `local@domain.tld`, unanchored
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

/// Shipping details entered on the checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl ShippingDetails {
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Name => &self.name,
            ShippingField::Address => &self.address,
            ShippingField::Phone => &self.phone,
            ShippingField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ShippingField::Name => self.name = value,
            ShippingField::Address => self.address = value,
            ShippingField::Phone => self.phone = value,
            ShippingField::Email => self.email = value,
        }
    }
}

/// A field on the shipping form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingField {
    Name,
    Address,
    Phone,
    Email,
}

impl ShippingField {
    /// All fields in form order
    pub const ALL: [ShippingField; 4] = [
        ShippingField::Name,
        ShippingField::Address,
        ShippingField::Phone,
        ShippingField::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingField::Name => "name",
            ShippingField::Address => "address",
            ShippingField::Phone => "phone",
            ShippingField::Email => "email",
        }
    }

    /// Human-readable label for prompts
    pub fn label(&self) -> &'static str {
        match self {
            ShippingField::Name => "Full name",
            ShippingField::Address => "Shipping address",
            ShippingField::Phone => "Phone",
            ShippingField::Email => "Email address",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation messages, keyed in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<ShippingField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: ShippingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: ShippingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ShippingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = ShippingField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShippingField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Validate shipping details against the required-field and format rules
///
/// Every rule is evaluated on each call; the returned set fully describes
/// the current state of the form. Values are checked as entered, without
/// trimming.
pub fn validate_shipping(details: &ShippingDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if details.name.is_empty() {
        errors.insert(ShippingField::Name, "Name is required");
    }

    if details.address.is_empty() {
        errors.insert(ShippingField::Address, "Address is required");
    }

    if details.phone.is_empty() {
        errors.insert(ShippingField::Phone, "Phone is required");
    } else if !PHONE_RE.is_match(&details.phone) {
        errors.insert(ShippingField::Phone, "Invalid phone number");
    }

    if details.email.is_empty() {
        errors.insert(ShippingField::Email, "Email is required");
    } else if !EMAIL_RE.is_match(&details.email) {
        errors.insert(ShippingField::Email, "Invalid email format");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(name: &str, address: &str, phone: &str, email: &str) -> ShippingDetails {
        ShippingDetails {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_all_fields_required() {
        let errors = validate_shipping(&ShippingDetails::default());

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(ShippingField::Name), Some("Name is required"));
        assert_eq!(errors.get(ShippingField::Address), Some("Address is required"));
        assert_eq!(errors.get(ShippingField::Phone), Some("Phone is required"));
        assert_eq!(errors.get(ShippingField::Email), Some("Email is required"));
    }

    #[test]
    fn test_short_phone_is_the_only_error() {
        let errors = validate_shipping(&details("A", "B", "12345", "x@y.com"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ShippingField::Phone), Some("Invalid phone number"));
    }

    #[test]
    fn test_valid_details() {
        let errors = validate_shipping(&details("A", "B", "1234567890", "x@y.com"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_phone_must_be_digits_only() {
        for phone in ["123-456-7890", "+11234567890", "12345 67890", " 1234567890", "١٢٣٤٥٦٧٨٩٠"] {
            let errors = validate_shipping(&details("A", "B", phone, "x@y.com"));
            assert_eq!(
                errors.get(ShippingField::Phone),
                Some("Invalid phone number"),
                "phone {:?} should be rejected",
                phone
            );
        }

        assert!(validate_shipping(&details("A", "B", "123456789012345", "x@y.com")).is_empty());
    }

    #[test]
    fn test_email_format() {
        for email in ["plainaddress", "x@y", "@y.com", "x@.com", "x @y.com"] {
            let errors = validate_shipping(&details("A", "B", "1234567890", email));
            assert_eq!(
                errors.get(ShippingField::Email),
                Some("Invalid email format"),
                "email {:?} should be rejected",
                email
            );
        }

        for email in ["jane.smith@example.co.uk", "a+tag@b.io", "see me@x.y.z"] {
            let errors = validate_shipping(&details("A", "B", "1234567890", email));
            assert!(errors.is_empty(), "email {:?} should be accepted", email);
        }
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let errors = validate_shipping(&details(" ", " ", "1234567890", "x@y.com"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_errors_serialize_by_field_name() {
        let errors = validate_shipping(&details("", "B", "1234567890", "x@y.com"));
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Name is required" }));
    }
}
