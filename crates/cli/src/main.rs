//! Shopfront CLI - Browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List the first products in the catalog
//! shopfront products --limit 5
//!
//! # Add product 1 to the cart (twice makes quantity 2)
//! shopfront add 1
//!
//! # Change its quantity, then review the cart
//! shopfront update 1 5
//! shopfront show
//!
//! # Place the order without prompting
//! shopfront --yes checkout
//! ```
//!
//! # Commands
//!
//! - `products` - List catalog products
//! - `show` - Show cart contents
//! - `add` / `remove` / `update` - Edit the cart
//! - `clear` - Empty the cart (asks first)
//! - `checkout` - Submit the cart as an order (asks first)
//!
//! The cart lives in `$SHOPFRONT_DATA_DIR/<SHOPFRONT_CART_KEY>.json` and
//! survives between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_cart::ShopfrontConfig;
use shopfront_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront cart and checkout")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Number of products to list
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Show cart contents
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product ID
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        id: ProductId,
    },
    /// Set the quantity of a product in the cart
    Update {
        /// Catalog product ID
        id: ProductId,

        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Submit the cart as an order
    Checkout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopfrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match ShopfrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Configuration error: {e}");
            }
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_cli=info,shopfront_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ShopfrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ui = terminal::TerminalInteraction::new(cli.yes);

    match cli.command {
        Commands::Products { limit } => commands::products::list(&config, limit).await?,
        Commands::Show => commands::cart::show(&config)?,
        Commands::Add { id } => commands::cart::add(&config, id).await?,
        Commands::Remove { id } => commands::cart::remove(&config, id)?,
        Commands::Update { id, quantity } => commands::cart::update(&config, id, quantity)?,
        Commands::Clear => commands::cart::clear(&config, &ui)?,
        Commands::Checkout => commands::checkout::run(&config, &ui).await?,
    }
    Ok(())
}
