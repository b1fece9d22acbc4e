//! Product domain model

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// A product as published by the catalog
///
/// Products are immutable once fetched. Upstream fields this storefront
/// doesn't use (e.g. `rating`) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Create a product with required fields
    pub fn new(id: i64, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
        }
    }

    /// Case-insensitive substring match against the title only
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }

    /// Validate product data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err("price cannot be negative");
        }
        Ok(())
    }
}

/// Serialize a price as a plain JSON number (the browser storage format)
///
/// The decimal text is written as-is, so no digits are lost on the way out.
pub(crate) fn serialize_price<S>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;
    let raw = RawValue::from_string(price.to_string()).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

/// Deserialize a price that can be a JSON number or a numeric string
///
/// Numbers are parsed from their source text rather than through `f64`.
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
    parse_price(raw.get()).map_err(D::Error::custom)
}

fn parse_price(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    if raw.starts_with('"') {
        let text: String = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        return text
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid decimal: {}", e));
    }
    if !raw.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return Err("expected number or string for price".to_string());
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("invalid decimal: {}", raw))
}
