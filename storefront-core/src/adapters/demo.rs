//! Demo catalog provider
//!
//! A fixed, offline catalogue for trying the storefront without network
//! access. Ids and prices are stable so saved carts stay meaningful across
//! runs.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Product;
use crate::ports::CatalogProvider;

/// Generate the demo catalogue
pub fn generate_demo_products() -> Vec<Product> {
    vec![
        demo_product(
            1,
            "Canvas Weekender Backpack",
            5495,
            "men's clothing",
            "Waxed canvas backpack with a padded laptop sleeve that fits 15 inch laptops, \
             leather straps and a roll-top closure for walks in the forest or the daily commute.",
        ),
        demo_product(
            2,
            "Slim Fit Crew T-Shirt",
            1999,
            "men's clothing",
            "Lightweight cotton tee with a slim fit and a ribbed crew neck.",
        ),
        demo_product(
            3,
            "Sterling Silver Chain Bracelet",
            6900,
            "jewelery",
            "Hand-finished sterling silver bracelet with a lobster clasp.",
        ),
        demo_product(
            4,
            "Rose Gold Stud Earrings",
            1099,
            "jewelery",
            "Minimal rose gold plated studs, nickel free.",
        ),
        demo_product(
            5,
            "1TB Portable External Hard Drive",
            6400,
            "electronics",
            "USB 3.0 portable drive with fast data transfers, improved PC performance and \
             high capacity; compatible with most laptops and desktops out of the box.",
        ),
        demo_product(
            6,
            "27 inch IPS Monitor",
            19999,
            "electronics",
            "Full HD IPS panel with thin bezels, 75Hz refresh rate and a tilt-adjustable stand.",
        ),
        demo_product(
            7,
            "Women's Rain Jacket",
            3995,
            "women's clothing",
            "Packable waterproof shell with an adjustable hood and taped seams.",
        ),
        demo_product(
            8,
            "Short Sleeve Boat Neck Top",
            985,
            "women's clothing",
            "Soft stretch knit top with a relaxed boat neckline.",
        ),
    ]
}

fn demo_product(id: i64, title: &str, cents: i64, category: &str, description: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        image: format!("https://example.com/storefront/demo-{}.jpg", id),
        category: category.to_string(),
    }
}

/// Demo catalog provider
///
/// Implements CatalogProvider with the built-in catalogue.
pub struct DemoCatalogProvider;

impl DemoCatalogProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoCatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for DemoCatalogProvider {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        Ok(generate_demo_products())
    }
}
