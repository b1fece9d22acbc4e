//! Checkout command - shipping form, simulated order, confirmation
//!
//! Interactive runs prompt for missing fields and re-prompt only the fields
//! that failed validation. Non-interactive runs (`--json`, piped stdin)
//! take the flags as-is and fail with the field errors.

use std::collections::HashMap;

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use storefront_core::services::{CheckoutForm, CheckoutOutcome};
use storefront_core::{LogEvent, OperationResult, OrderConfirmation, ShippingField, ValidationErrors};

use super::cart::print_cart;
use super::{block_on, get_context, get_logger, log_event, spinner};
use crate::output::format_price;

const FIX_FIELDS_MESSAGE: &str = "Please fix the highlighted fields";

pub struct CheckoutArgs {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub yes: bool,
    pub json: bool,
}

pub fn run(args: CheckoutArgs) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context(&logger)?;
    let interactive = !args.json && atty::is(atty::Stream::Stdin);

    if ctx.cart.is_empty() {
        return fail(args.json, "Your cart is empty");
    }

    let mut form = CheckoutForm::new();
    for (field, value) in [
        (ShippingField::Name, args.name),
        (ShippingField::Address, args.address),
        (ShippingField::Phone, args.phone),
        (ShippingField::Email, args.email),
    ] {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }

    if !args.json {
        println!("\n{}", "Checkout".bold());
        print_cart(&ctx.cart);
    }

    if interactive {
        for field in ShippingField::ALL {
            if form.field(field).is_empty() {
                let value = prompt_field(field, "")?;
                form.set_field(field, value);
            }
        }

        while !form.validate_form() {
            print_errors(form.errors());
            let invalid: Vec<ShippingField> = form.errors().fields().collect();
            for field in invalid {
                let value = prompt_field(field, form.field(field))?;
                form.set_field(field, value);
            }
        }

        let place_order = Confirm::new()
            .with_prompt(format!("Place order for {}?", format_price(ctx.cart.total())))
            .default(true)
            .interact()?;
        if !place_order {
            form.cancel();
            println!("{}\n", "Checkout cancelled. Your cart has not changed.".dimmed());
            return Ok(());
        }
    }

    let pb = spinner("Processing...", !args.json)?;
    let submitted = block_on(ctx.checkout.submit(&mut form, &ctx.cart))?;
    pb.finish_and_clear();

    let confirmation = match submitted {
        Ok(CheckoutOutcome::Confirmed(confirmation)) => confirmation,
        Ok(CheckoutOutcome::Invalid(errors)) => return invalid(args.json, &errors),
        Err(e) => return fail(args.json, &e.to_string()),
    };
    log_event(&logger, LogEvent::new("order_placed").with_command("checkout"));

    if !args.json {
        print_confirmation(&confirmation);
    }

    let acknowledged = args.yes
        || (interactive
            && Confirm::new()
                .with_prompt("Close and empty your cart?")
                .default(true)
                .interact()?);
    if acknowledged {
        ctx.checkout.confirm_order(&mut ctx.cart)?;
    }

    if args.json {
        let data = serde_json::json!({
            "confirmation": confirmation,
            "cart_cleared": acknowledged,
        });
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(data))?);
    } else if acknowledged {
        println!("{} Cart cleared\n", "✓".green());
    } else {
        println!("{}\n", "Your cart was kept.".dimmed());
    }

    Ok(())
}

fn prompt_field(field: ShippingField, initial: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(field.label())
        .allow_empty(true);
    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }
    Ok(input.interact_text()?)
}

fn print_errors(errors: &ValidationErrors) {
    println!();
    for (field, message) in errors.iter() {
        println!("  {} {}", format!("{}:", field.label()).bold(), message.red());
    }
    println!();
}

fn print_confirmation(confirmation: &OrderConfirmation) {
    println!("\n{}", "Order Confirmed!".green().bold());
    println!("  Reference: {}", confirmation.short_reference());
    println!(
        "  Items: {} ({} products)",
        confirmation.item_count, confirmation.line_count
    );
    println!("  Total: {}", format_price(confirmation.total).bold());
    println!("\n{}\n", "Thank you for your order.".dimmed());
}

fn invalid(json: bool, errors: &ValidationErrors) -> Result<()> {
    if json {
        let context: HashMap<String, serde_json::Value> = errors
            .iter()
            .map(|(field, message)| (field.as_str().to_string(), serde_json::json!(message)))
            .collect();
        let result: OperationResult<()> = OperationResult::fail_with_context(FIX_FIELDS_MESSAGE, context);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_errors(errors);
    }
    bail!(FIX_FIELDS_MESSAGE)
}

fn fail(json: bool, message: &str) -> Result<()> {
    if json {
        let result: OperationResult<()> = OperationResult::fail(message);
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    bail!("{}", message)
}
