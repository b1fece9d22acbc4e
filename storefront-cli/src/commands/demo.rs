//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_storefront_dir;
use crate::output;
use storefront_core::services::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off {
        /// Also delete the demo cart
        #[arg(long)]
        clean: bool,
    },
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let storefront_dir = get_storefront_dir()?;
    std::fs::create_dir_all(&storefront_dir)?;
    let demo_service = DemoService::new(&storefront_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            output::success("Demo mode enabled");
            println!("A built-in catalog is used and your real cart is left alone. Run 'shop products' to browse.");
            Ok(())
        }
        Some(DemoCommands::Off { clean }) => {
            demo_service.disable(clean)?;
            output::warning("Demo mode disabled");
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}
