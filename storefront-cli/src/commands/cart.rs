//! Cart command - show and change the cart

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use storefront_core::services::CartStore;
use storefront_core::{CartSummary, LogEvent};

use super::{get_context, get_logger, load_catalog, log_event};
use crate::output::{create_table, format_price};

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart contents and total
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one of a product to the cart
    Add {
        /// Product ID (see 'shop products')
        id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: i64,
    },
    /// Empty the cart
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run(command: Option<CartCommands>) -> Result<()> {
    match command {
        Some(CartCommands::Show { json }) => show(json),
        None => show(false),
        Some(CartCommands::Add { id }) => add(id),
        Some(CartCommands::Remove { id }) => remove(id),
        Some(CartCommands::Clear { force }) => clear(force),
    }
}

fn show(json: bool) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context(&logger)?;
    let cart = &ctx.cart;

    if json {
        let summary = CartSummary::from(cart.cart());
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if cart.is_empty() {
        println!("\n{}\n", "Your cart is empty".dimmed());
        return Ok(());
    }

    print_cart(cart);
    println!("{}\n", "Check out with 'shop checkout'".dimmed());
    Ok(())
}

/// Cart table plus total line
pub fn print_cart(cart: &CartStore) {
    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Qty", "Price", "Subtotal"]);
    for item in cart.items() {
        table.add_row(vec![
            item.id().to_string(),
            item.product.title.clone(),
            item.quantity.to_string(),
            format_price(item.product.price),
            format_price(item.subtotal()),
        ]);
    }

    println!("\n{}", table);
    println!("  {} {}\n", "Total:".bold(), format_price(cart.total()).bold());
}

fn add(id: i64) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context(&logger)?;
    load_catalog(&mut ctx, &logger, atty::is(atty::Stream::Stdout))?;

    let product = ctx.catalog.require(id)?.clone();

    ctx.cart.add_to_cart(&product)?;
    log_event(
        &logger,
        LogEvent::new("cart_item_added").with_command("cart add").with_product(id),
    );

    let quantity = ctx.cart.get(id).map(|item| item.quantity).unwrap_or(1);
    println!(
        "\n{} Added {} (x{}) - {} in cart, total {}\n",
        "✓".green(),
        product.title,
        quantity,
        ctx.cart.len(),
        format_price(ctx.cart.total())
    );
    Ok(())
}

fn remove(id: i64) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context(&logger)?;

    if !ctx.cart.remove_from_cart(id)? {
        println!("{}", format!("Product {} is not in your cart", id).yellow());
        return Ok(());
    }

    log_event(
        &logger,
        LogEvent::new("cart_item_removed").with_command("cart remove").with_product(id),
    );
    println!(
        "\n{} Removed product {} - total {}\n",
        "✓".green(),
        id,
        format_price(ctx.cart.total())
    );
    Ok(())
}

fn clear(force: bool) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context(&logger)?;

    if ctx.cart.is_empty() {
        println!("{}", "Your cart is already empty".dimmed());
        return Ok(());
    }

    if !force
        && !Confirm::new()
            .with_prompt(format!("Remove all {} items from your cart?", ctx.cart.len()))
            .default(false)
            .interact()?
    {
        println!("{}\n", "Cancelled".dimmed());
        return Ok(());
    }

    ctx.cart.clear_cart()?;
    log_event(&logger, LogEvent::new("cart_cleared").with_command("cart clear"));
    println!("\n{} Cart cleared\n", "✓".green());
    Ok(())
}
