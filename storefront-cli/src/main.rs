//! Storefront CLI - Shopping in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{cart, checkout, demo, logs, products};
use storefront_core::LogEvent;

/// Storefront - browse products, fill a cart and check out from your terminal
#[derive(Parser)]
#[command(name = "shop", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the catalog
    Products {
        /// Only show products whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        command: Option<cart::CartCommands>,
    },

    /// Check out the current cart
    Checkout {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Shipping address
        #[arg(long)]
        address: Option<String>,
        /// Phone number (digits only, at least 10)
        #[arg(long)]
        phone: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Place the order and clear the cart without asking
        #[arg(long, short)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Products { .. } => "products",
            Commands::Cart { .. } => "cart",
            Commands::Checkout { .. } => "checkout",
            Commands::Demo { .. } => "demo",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Closed again before the command opens its own handle on logs.duckdb
    {
        let logger = commands::get_logger();
        commands::log_event(
            &logger,
            LogEvent::new("command_executed").with_command(cli.command.name()),
        );
    }

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Products { search, json } => products::run(search.as_deref(), json),
        Commands::Cart { command } => cart::run(command),
        Commands::Checkout { name, address, phone, email, yes, json } => {
            checkout::run(checkout::CheckoutArgs { name, address, phone, email, yes, json })
        }
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
