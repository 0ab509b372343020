//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand, ValueEnum};
use softo_commerce::catalog::ProductKind;

/// Product kind as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Clothes,
    Shoes,
}

impl From<KindArg> for ProductKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Clothes => ProductKind::Clothes,
            KindArg::Shoes => ProductKind::Shoes,
        }
    }
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Product kind.
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add a catalog product to the cart.
    Add {
        /// Product ID.
        product_id: String,

        /// Size; defaults to the first size offered for the product.
        #[arg(short, long)]
        size: Option<String>,

        /// Quantity. Fractions are floored, values below 1 become 1.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        qty: f64,

        /// Category slug to look the product up in.
        #[arg(long)]
        category: Option<String>,
    },
    /// Increase a line's quantity by one.
    Inc {
        /// Line key (e.g. p1__M).
        key: String,
    },
    /// Decrease a line's quantity by one, removing it at zero.
    Dec {
        /// Line key.
        key: String,
    },
    /// Remove a line.
    Remove {
        /// Line key.
        key: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Also print the order message.
    #[arg(short, long)]
    pub message: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
