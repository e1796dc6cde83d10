//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod order_summary;
pub mod product;
pub mod render;
pub mod search;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text to search for.
    pub query: Option<String>,

    /// Only show this category (repeatable).
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Only show this manufacturer (repeatable).
    #[arg(short, long)]
    pub manufacturer: Vec<String>,

    /// Only show products with this tag (repeatable).
    #[arg(short, long)]
    pub tag: Vec<String>,

    /// Results page.
    #[arg(short, long, default_value = "1")]
    pub page: i64,

    /// Also list the filter panel with counts.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product name.
    pub name: String,

    /// Add this many to the cart. Invalid amounts count as 1.
    #[arg(long, value_name = "AMOUNT")]
    pub add: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List the cart.
    Show,
    /// Add a product.
    Add {
        /// Product name.
        name: String,
        /// Units to add.
        #[arg(short, long, default_value = "1")]
        amount: i64,
    },
    /// Set a line's amount; 0 removes it.
    Set {
        /// Product name.
        name: String,
        /// New amount.
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Remove a product.
    Remove {
        /// Product name.
        name: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command. Missing fields are prompted for.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub phone_number: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Date of birth, YYYY-MM-DD.
    #[arg(long)]
    pub dob: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Page path with query, e.g. "/search.html?category=GPU".
    #[arg(default_value = "/")]
    pub href: String,

    /// Write the HTML to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Leave brand icon markers unresolved.
    #[arg(long)]
    pub no_icons: bool,
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
    /// Write a jsp.toml with the defaults.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
