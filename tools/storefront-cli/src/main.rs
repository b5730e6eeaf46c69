//! Storefront CLI - order from the menu from a terminal.
//!
//! Commands:
//! - `storefront menu` - Browse products
//! - `storefront cart` - Show and edit the cart
//! - `storefront branch` - Choose a branch and order type
//! - `storefront quote` - Price the cart
//! - `storefront checkout` - Place the order
//! - `storefront config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BranchArgs, CartArgs, CheckoutArgs, ConfigArgs, MenuArgs, QuoteArgs};

/// Storefront CLI - build a cart and place orders
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Keep the cart under a named session instead of the shared store
    #[arg(long, global = true)]
    session: Option<String>,

    /// Read products from a menu JSON file instead of the API
    #[arg(long, global = true)]
    menu: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(MenuArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Choose a branch and order type
    Branch(BranchArgs),

    /// Price the cart without ordering
    Quote(QuoteArgs),

    /// Place the order
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let options = context::Options {
        config_path: cli.config,
        session: cli.session,
        menu_path: cli.menu,
    };
    let ctx = match context::Context::load(options, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Branch(args) => commands::branch::run(args, &ctx),
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
