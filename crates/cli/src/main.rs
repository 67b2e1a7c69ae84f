//! Vitrine CLI - a terminal storefront over the cart and inventory core.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! vitrine migrate
//!
//! # Browse stock and fill the cart anonymously
//! vitrine stock linen-dress
//! vitrine cart add linen-dress --size M --color Navy
//!
//! # Sign in (reconciles the device cart with the account cart)
//! vitrine login u-123 --audience feminine
//!
//! # Hand the order off to the shop
//! vitrine checkout
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `login` / `logout` - Start or end a shopper session
//! - `cart` - Show and change the cart
//! - `stock` - Show stock for a product
//! - `wishlist` - Show and toggle wishlisted products
//! - `layout` - Show or set the listing layout
//! - `checkout` - Build the messaging checkout link and clear the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_core::LayoutPreference;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::copy::Audience;

mod commands;
mod error;
mod session;

use error::CliError;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Sign in and reconcile the device cart with the account cart
    Login {
        /// User ID issued by the identity provider
        user_id: String,

        /// Form of address for greetings
        #[arg(short, long, value_enum, default_value_t = AudienceArg::Neutral)]
        audience: AudienceArg,
    },
    /// Sign out; the device cart is kept
    Logout,
    /// Show and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show stock for a product
    Stock {
        /// Product slug
        slug: String,

        /// Only check this size
        #[arg(short, long)]
        size: Option<String>,

        /// Only check this color
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Show and toggle wishlisted products
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Show or set the listing layout
    Layout {
        /// New layout
        #[arg(value_enum)]
        layout: Option<LayoutArg>,
    },
    /// Build the checkout link and clear the cart
    Checkout {
        /// Shop phone number (overrides `VITRINE_CHECKOUT_PHONE`)
        #[arg(short, long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the total
    Show,
    /// Add one unit of a product variant
    Add {
        /// Product slug
        slug: String,

        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        color: String,
    },
    /// Remove a line
    Remove {
        /// Product slug
        slug: String,

        #[arg(short, long)]
        size: String,
    },
    /// Change a line's quantity (never below 1)
    Qty {
        /// Product slug
        slug: String,

        #[arg(short, long)]
        size: String,

        /// Amount to add, negative to subtract
        #[arg(short, long, allow_hyphen_values = true)]
        delta: i32,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List wishlisted products
    List,
    /// Add or remove a product
    Toggle {
        /// Product slug
        slug: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AudienceArg {
    Feminine,
    Masculine,
    Neutral,
}

impl From<AudienceArg> for Audience {
    fn from(arg: AudienceArg) -> Self {
        match arg {
            AudienceArg::Feminine => Self::Feminine,
            AudienceArg::Masculine => Self::Masculine,
            AudienceArg::Neutral => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Grid,
    List,
}

impl From<LayoutArg> for LayoutPreference {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Grid => Self::Grid,
            LayoutArg::List => Self::List,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
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

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Invalid configuration: {e}");
            }
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_storefront=info,vitrine_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        let message = e.report();
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {message}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront(config).await?,
        Commands::Login { user_id, audience } => {
            commands::session::login(config, user_id, audience.into()).await?;
        }
        Commands::Logout => commands::session::logout(config)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(config)?,
            CartAction::Add { slug, size, color } => {
                commands::cart::add(config, &slug, &size, &color).await?;
            }
            CartAction::Remove { slug, size } => {
                commands::cart::remove(config, &slug, &size).await?;
            }
            CartAction::Qty { slug, size, delta } => {
                commands::cart::change_quantity(config, &slug, &size, delta).await?;
            }
            CartAction::Clear => commands::cart::clear(config).await?,
        },
        Commands::Stock { slug, size, color } => {
            commands::stock::show(config, &slug, size.as_deref(), color.as_deref()).await?;
        }
        Commands::Wishlist { action } => match action {
            WishlistAction::List => commands::wishlist::list(config)?,
            WishlistAction::Toggle { slug } => commands::wishlist::toggle(config, &slug).await?,
        },
        Commands::Layout { layout } => commands::layout::run(config, layout.map(Into::into))?,
        Commands::Checkout { phone } => commands::checkout::run(config, phone).await?,
    }
    Ok(())
}
