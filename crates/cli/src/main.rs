//! Kitbag CLI - catalog, cart and submission tools.
//!
//! Works directly on the storefront's data directory, so a cart edited here
//! is the cart the server restores on its next start.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kb-cli catalog list --size XL --sort price-asc
//! kb-cli catalog show rma-home-2024
//!
//! # Edit the cart
//! kb-cli cart add psg-home-2024 --size L --player Mbappe --quantity 2
//! kb-cli cart update psg-home-2024 --size L --player Mbappe --quantity 0
//! kb-cli cart show
//!
//! # Review admin submissions
//! kb-cli submissions list
//! ```
//!
//! # Commands
//!
//! - `catalog` - List and inspect products
//! - `cart` - Show and modify the persisted cart
//! - `submissions` - List or delete recorded product submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kitbag_core::Size;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "kb-cli")]
#[command(author, version, about = "Kitbag CLI tools")]
struct Cli {
    /// Data directory (overrides `KITBAG_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show or modify the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage admin product submissions
    Submissions {
        #[command(subcommand)]
        action: SubmissionsAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only this team (exact name)
        #[arg(short, long)]
        team: Option<String>,

        /// Only products made in this size
        #[arg(short, long)]
        size: Option<Size>,

        /// Sort order (`popularity`, `price-asc`, `price-desc`)
        #[arg(long, default_value = "popularity")]
        sort: String,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: String,

        /// Size (defaults to the product's first size)
        #[arg(short, long)]
        size: Option<Size>,

        /// Player name printed on the shirt
        #[arg(short, long)]
        player: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: Size,

        #[arg(short, long)]
        player: Option<String>,
    },
    /// Set a line's quantity (zero or less removes it)
    Update {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: Size,

        #[arg(short, long)]
        player: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum SubmissionsAction {
    /// List recorded submissions
    List,
    /// Delete all recorded submissions
    Clear,
}

fn main() {
    // Initialize tracing; commands report through `info!`
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load(cli.data_dir)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { team, size, sort } => {
                commands::catalog::list(&ctx, team, size, &sort)?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add {
                id,
                size,
                player,
                quantity,
            } => commands::cart::add(&ctx, &id, size, player.as_deref(), quantity)?,
            CartAction::Remove { id, size, player } => {
                commands::cart::remove(&ctx, &id, size, player.as_deref());
            }
            CartAction::Update {
                id,
                size,
                player,
                quantity,
            } => commands::cart::update(&ctx, &id, size, player.as_deref(), quantity)?,
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Submissions { action } => match action {
            SubmissionsAction::List => commands::submissions::list(&ctx),
            SubmissionsAction::Clear => commands::submissions::clear(&ctx)?,
        },
    }
    Ok(())
}
