//! SleepWell CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! sw-cli products
//!
//! # Put two units of product 1 in the cart, then look at it
//! sw-cli cart add 1 --quantity 2
//! sw-cli cart show
//!
//! # Place the order described in a YAML file (camelCase field names)
//! sw-cli checkout --form checkout.yaml
//!
//! # Subscribe to the newsletter
//! sw-cli subscribe dormi@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `SLEEPWELL_API_URL` - Storefront API base URL (default `http://127.0.0.1:3000`)
//! - `SLEEPWELL_SESSION_FILE` - Where the cart session id is kept
//!   (default `$HOME/.sleepwell/session`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sleepwell_client::{ApiClient, SessionStore};
use sleepwell_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "sw-cli")]
#[command(author, version, about = "SleepWell storefront CLI")]
struct Cli {
    /// Storefront API base URL
    #[arg(
        long,
        global = true,
        env = "SLEEPWELL_API_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    api_url: String,

    /// File holding the cart session id
    #[arg(long, global = true, env = "SLEEPWELL_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    Products,
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout {
        /// YAML file with the checkout form
        #[arg(short, long)]
        form: PathBuf,
    },
    /// Subscribe an email address to the newsletter
    Subscribe {
        email: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its totals
    Show,
    /// Add a product
    Add {
        product_id: i32,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove { product_id: i32 },
    /// Set the quantity of a product already in the cart (minimum 1)
    Set {
        product_id: i32,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sleepwell_cli=info,sleepwell_client=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::new(&cli.api_url)?;
    let session = match cli.session_file {
        Some(path) => SessionStore::new(path),
        None => SessionStore::from_env()?,
    };

    match cli.command {
        Commands::Products => commands::catalog::list(&api).await?,
        Commands::Cart { action } => {
            let mut cart = commands::open_cart(api, &session).await?;
            match action {
                CartAction::Show => {}
                CartAction::Add {
                    product_id,
                    quantity,
                } => cart.add_to_cart(ProductId::new(product_id), quantity).await,
                CartAction::Remove { product_id } => {
                    cart.remove_from_cart(ProductId::new(product_id)).await;
                }
                CartAction::Set {
                    product_id,
                    quantity,
                } => {
                    cart.update_cart_item_quantity(ProductId::new(product_id), quantity)
                        .await;
                }
                CartAction::Clear => cart.clear_cart().await,
            }
            commands::cart::show(&cart);
        }
        Commands::Checkout { form } => {
            let form = commands::checkout::read_form(&form)?;
            let mut cart = commands::open_cart(api, &session).await?;
            commands::checkout::place_order(&mut cart, &form).await?;
        }
        Commands::Subscribe { email } => commands::newsletter::subscribe(&api, &email).await?,
    }
    Ok(())
}
