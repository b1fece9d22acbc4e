//! Products command - the product grid

use anyhow::Result;
use colored::Colorize;
use storefront_core::Product;

use super::{get_context, get_logger, load_catalog};
use crate::output::{cart_badge, create_table, format_price, truncate_description};

pub fn run(search: Option<&str>, json: bool) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context(&logger)?;
    load_catalog(&mut ctx, &logger, !json && atty::is(atty::Stream::Stdout))?;

    let products: Vec<&Product> = match search {
        Some(query) => ctx.catalog.search(query),
        None => ctx.catalog.products().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    let mode = if ctx.config.demo_mode { " (demo)".yellow().to_string() } else { String::new() };
    println!(
        "\n{}{}  {}",
        "Products".bold(),
        mode,
        cart_badge(ctx.cart.len()).cyan()
    );

    if products.is_empty() {
        match search {
            Some(query) => println!("{}\n", format!("No products match '{}'", query).dimmed()),
            None => println!("{}\n", "No products available".dimmed()),
        }
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Category", "Price", "Description"]);
    for product in &products {
        table.add_row(vec![
            product.id.to_string(),
            product.title.clone(),
            product.category.clone(),
            format_price(product.price),
            truncate_description(&product.description),
        ]);
    }
    println!("{}", table);
    println!("{}\n", "Add one with 'shop cart add <ID>'".dimmed());

    Ok(())
}
