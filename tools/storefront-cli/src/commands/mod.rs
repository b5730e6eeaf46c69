//! CLI command implementations.

pub mod branch;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod quote;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only list products in this category.
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Show one product with its add-ons and related items.
    #[arg(short, long, conflicts_with = "category")]
    pub product: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,

    /// Add a product to the cart.
    Add {
        /// Product ID.
        product: String,

        /// Number of units.
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,

        /// Add-on pick as `Heading=Label`. Repeat for more picks.
        #[arg(long = "pick", value_name = "HEADING=LABEL")]
        picks: Vec<String>,
    },

    /// Remove a line from the cart.
    Remove {
        /// Cart line ID, as shown by `cart show`.
        entry: String,
    },

    /// Set the quantity of a line. Zero removes it.
    Qty {
        /// Cart line ID.
        entry: String,

        /// New quantity.
        quantity: i64,
    },

    /// Add one unit to a line.
    Inc {
        /// Cart line ID.
        entry: String,
    },

    /// Take one unit off a line.
    Dec {
        /// Cart line ID.
        entry: String,
    },

    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the branch command.
#[derive(Args)]
pub struct BranchArgs {
    #[command(subcommand)]
    pub command: Option<BranchCommand>,
}

/// Branch subcommands.
#[derive(Subcommand)]
pub enum BranchCommand {
    /// Show the current selection (default).
    Show,

    /// Choose how and where the order is fulfilled.
    Set {
        /// Order type: delivery, pickup or dine-in.
        #[arg(short = 't', long)]
        order_type: String,

        /// Branch ID.
        #[arg(short, long)]
        branch_id: Option<String>,

        /// Branch display name.
        #[arg(short = 'n', long, requires = "branch_id")]
        branch_name: Option<String>,

        /// Delivery address.
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Forget the branch selection.
    Clear,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Promo code to price in.
    #[arg(short, long)]
    pub discount: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Promo code to apply.
    #[arg(short, long)]
    pub discount: Option<String>,

    /// Customer ID to attach to the order.
    #[arg(long)]
    pub customer: Option<String>,

    /// Note for the kitchen.
    #[arg(short, long)]
    pub note: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
