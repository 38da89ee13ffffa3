//! `VMart` CLI - Drive the storefront stores from the command line.
//!
//! State (session, cart, wishlist) is persisted under `VMART_STORAGE_DIR`
//! so it survives across invocations.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! vmart catalog featured
//! vmart catalog category electronics --sort price-low --in-stock
//!
//! # Log in and fill the cart
//! vmart login -e customer@example.com -p customer123
//! vmart cart add product-1 --quantity 2
//!
//! # Place the order
//! vmart checkout place --full-name "Jane Doe" --address "1 Main St" \
//!     --city Springfield --state IL --postal-code 62701 --country US \
//!     --payment paypal
//! ```
//!
//! # Commands
//!
//! - `catalog` - Browse and search products
//! - `login`, `register`, `logout`, `whoami`, `password` - Session management
//! - `cart` - Manage the shopping cart
//! - `wishlist` - Manage saved products
//! - `checkout` - Show order totals or place an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vmart_storefront::config::StorefrontConfig;
use vmart_storefront::error::{AppError, SentryUserContext};
use vmart_storefront::state::AppState;

mod commands;

use commands::{CartAction, CatalogAction, CheckoutAction, WishlistAction};

#[derive(Parser)]
#[command(name = "vmart")]
#[command(author, version, about = "VMart storefront CLI")]
struct Cli {
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
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create a customer account and log in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the wishlist
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Change the logged-in user's password
    Password {
        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,

        #[arg(long)]
        confirm: String,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Review totals or place an order
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry.environment.clone().into()),
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
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StorefrontConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vmart_storefront=info,vmart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            AppError::from(e).report();
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::from_config(config);
    if sentry_guard.is_some() {
        tracing::debug!("Sentry initialized");
        state.subscribe(Arc::new(SentryUserContext));
    }

    match run(cli, &state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            commands::output::failure(&e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, state: &AppState) -> Result<(), AppError> {
    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(state, action).await,
        Commands::Login { email, password } => {
            commands::session::login(state, &email, &password).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::session::register(state, &name, &email, &password).await,
        Commands::Logout => {
            commands::session::logout(state);
            Ok(())
        }
        Commands::Whoami => {
            commands::session::whoami(state);
            Ok(())
        }
        Commands::Password {
            current,
            new,
            confirm,
        } => commands::session::change_password(state, &current, &new, &confirm),
        Commands::Cart { action } => commands::cart::run(state, action).await,
        Commands::Wishlist { action } => commands::wishlist::run(state, action).await,
        Commands::Checkout { action } => commands::checkout::run(state, action).await,
    }
}
