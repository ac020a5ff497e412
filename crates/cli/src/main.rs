//! BeniLink CLI - Catalog inspection and order listing.
//!
//! # Usage
//!
//! ```bash
//! # Dump the derived catalog
//! benilink catalog
//! benilink catalog --json
//!
//! # List persisted orders, newest first
//! benilink orders list
//! benilink orders list --limit 10 --json
//! ```
//!
//! Reads the same environment as the server: pricing overrides apply to
//! `catalog`, `ORDERS_DIR` locates the order log for `orders list`.

#![cfg_attr(not(test), forbid(unsafe_code))]
// operator-facing output goes to stdout by design
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use benilink_server::config::ServerConfig;
use benilink_server::store::OrderStore;

mod commands;

#[derive(Parser)]
#[command(name = "benilink")]
#[command(author, version, about = "BeniLink CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the derived product catalog
    Catalog {
        /// Emit the JSON the API serves instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect persisted orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Maximum number of orders to show (0 = all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    match cli.command {
        Commands::Catalog { json } => commands::catalog::dump(&config.pricing, json)?,
        Commands::Orders { action } => match action {
            OrdersAction::List { limit, json } => {
                let store = OrderStore::new(config.orders_dir.clone(), None);
                commands::orders::list(&store, limit, json).await?;
            }
        },
    }
    Ok(())
}
