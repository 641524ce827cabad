//! Truper catalog CLI - browse the catalog and manage the quote cart.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog
//! catalogo search pala
//!
//! # Show one product
//! catalogo show 17549
//!
//! # Work with the persisted cart
//! catalogo cart add 17549
//! catalogo cart update 17549 3
//! catalogo cart list
//!
//! # Build the WhatsApp quote for the current cart
//! catalogo quote -n "Juan Pérez" -p 8888-8888 --clear
//! ```
//!
//! The cart lives in the same file the storefront uses, so both see the
//! same cart when run from the same directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use truper_catalog_core::ProductCode;

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "catalogo")]
#[command(author, version, about = "Truper catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a free-text query
    Search {
        /// Words to look for; empty lists everything
        #[arg(default_value = "")]
        query: String,
    },
    /// Show a product's details
    Show {
        /// Product code
        code: ProductCode,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Build the quote message and WhatsApp link
    Quote {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Customer phone (8 digits, optional dash after the fourth)
        #[arg(short, long)]
        phone: String,

        /// Send to this number instead of `WHATSAPP_BUSINESS_NUMBER`
        #[arg(long)]
        to: Option<String>,

        /// Empty the cart after building the quote
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines
    List,
    /// Print the total number of units
    Count,
    /// Add one unit of a product
    Add { code: ProductCode },
    /// Set a line's quantity; 0 or less removes it
    Update {
        code: ProductCode,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit to a line
    Increment { code: ProductCode },
    /// Take one unit off a line, keeping at least one
    Decrement { code: ProductCode },
    /// Remove a line
    Remove { code: ProductCode },
    /// Empty the cart
    Clear,
}

fn main() {
    // Logs go to stderr so stdout stays clean for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Search { query } => commands::catalog::search(&ctx, &query, &mut out)?,
        Commands::Show { code } => commands::catalog::show(&ctx, &code, &mut out)?,
        Commands::Cart { action } => {
            let mut store = ctx.open_cart();
            match action {
                CartAction::List => commands::cart::list(&store, &mut out)?,
                CartAction::Count => commands::cart::count(&store, &mut out)?,
                CartAction::Add { code } => {
                    commands::cart::add(&ctx, &mut store, &code, &mut out)?;
                }
                CartAction::Update { code, quantity } => {
                    commands::cart::update(&mut store, &code, quantity, &mut out)?;
                }
                CartAction::Increment { code } => {
                    commands::cart::increment(&mut store, &code, &mut out)?;
                }
                CartAction::Decrement { code } => {
                    commands::cart::decrement(&mut store, &code, &mut out)?;
                }
                CartAction::Remove { code } => {
                    commands::cart::remove(&mut store, &code, &mut out)?;
                }
                CartAction::Clear => commands::cart::clear(&mut store, &mut out)?,
            }
        }
        Commands::Quote {
            name,
            phone,
            to,
            clear,
        } => {
            let config = commands::quote::resolve_config(to.as_deref())?;
            let mut store = ctx.open_cart();
            let dispatcher = commands::quote::StdoutDispatcher;
            commands::quote::run(&mut store, &name, &phone, &config, clear, &dispatcher)?;
        }
    }

    out.flush()?;
    Ok(())
}
