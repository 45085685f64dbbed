//! Catalog Cart CLI - accounts, catalog browsing and a cart session.
//!
//! # Usage
//!
//! ```bash
//! # Create an account, then sign in (stores the token locally)
//! catalog-cli register --full-name "Ada Lovelace" --email ada@example.com --password secret
//! catalog-cli login --email ada@example.com --password secret
//!
//! # Browse the catalog
//! catalog-cli products --page 2
//!
//! # Create a product
//! catalog-cli add-product --name Lamp --brand Lumo --price 12.50 --rating 4 --image lamp.png
//!
//! # Interactive cart session
//! catalog-cli shop
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_BASE_URL` - Base URL of the shop API
//! - `CATALOG_REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds
//! - `CATALOG_STORAGE_PATH` - File holding the login token
//! - `CATALOG_PAGE_SIZE` - Products per page
//! - `RUST_LOG` - Log filter (logs go to stderr)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;

use catalog_cart_storefront::api::ApiClient;
use catalog_cart_storefront::config::ClientConfig;
use catalog_cart_storefront::storage::FileStore;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod commands;
mod console;
mod error;
#[cfg(test)]
mod testing;

use commands::auth::Credentials;
use commands::products::ProductInput;
use console::ConsoleToaster;
use error::CliError;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Catalog Cart command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Full name
        #[arg(long)]
        full_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign in and store the session token
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Print one page of the catalog
    Products {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Create a product with an image
    AddProduct {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Brand
        #[arg(short, long)]
        brand: String,

        /// Price, e.g. `12.50`
        #[arg(long)]
        price: String,

        /// Rating, e.g. `4.5`
        #[arg(short, long)]
        rating: String,

        /// Image file (png, jpeg, gif or webp)
        #[arg(short, long)]
        image: PathBuf,
    },
    /// Interactive session: browse pages and manage a cart
    Shop,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_cart_storefront=info,catalog_cart_cli=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::from_env()?;
    let api = ApiClient::new(&config)?;
    tracing::debug!(base_url = %api.base_url(), "Using shop API");

    let mut toaster = ConsoleToaster::stdout();
    let mut out = io::stdout();

    match cli.command {
        Commands::Register {
            full_name,
            email,
            password,
        } => {
            let credentials = Credentials { email, password };
            commands::auth::register(&api, &mut toaster, full_name, credentials).await
        }
        Commands::Login { email, password } => {
            let mut store = FileStore::open(config.storage_path.clone())?;
            let credentials = Credentials { email, password };
            commands::auth::login(&api, &mut store, &mut toaster, credentials).await
        }
        Commands::Logout => {
            let mut store = FileStore::open(config.storage_path.clone())?;
            commands::auth::logout(&mut store, &mut toaster)
        }
        Commands::Products { page } => {
            commands::products::list(&api, config.page_size, page, &mut out).await
        }
        Commands::AddProduct {
            name,
            brand,
            price,
            rating,
            image,
        } => {
            let input = ProductInput {
                name,
                brand,
                price,
                rating,
                image,
            };
            commands::products::add(&api, config.page_size, input, &mut toaster, &mut out).await
        }
        Commands::Shop => {
            let stdin = BufReader::new(tokio::io::stdin());
            commands::shop::run(&api, config.page_size, stdin, &mut toaster, &mut out).await
        }
    }
}
