//! CLI command implementations.

pub mod config;
pub mod interactive;
pub mod quote;
pub mod rates;

use clap::{Args, Subcommand};
use fee_engine::{DeliveryMethod, PaymentTier};

/// Arguments for the quote command.
#[derive(Args, Debug, Default)]
pub struct QuoteArgs {
    /// Sale price of one unit. Without it the calculation waits for input.
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(0..))]
    pub price: Option<i64>,

    /// Number of units.
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
    pub qty: Option<i64>,

    /// Shipping charge paid by the buyer.
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(0..))]
    pub shipping: Option<i64>,

    /// Delivery method: general or handover.
    #[arg(short, long)]
    pub delivery: Option<DeliveryMethod>,

    /// Payment tier: non_credit, credit_lump_sum, credit_3, credit_6, credit_12, credit_24.
    #[arg(short = 'm', long)]
    pub payment: Option<PaymentTier>,

    /// Cost of one unit, for gross profit.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    pub cost: Option<i64>,

    /// Show the per-component fee details.
    #[arg(long)]
    pub detail: bool,
}

/// Arguments for the rates command.
#[derive(Args, Debug)]
pub struct RatesArgs {
    /// Show the older two-rate schedule instead of the configured one.
    #[arg(long)]
    pub legacy: bool,
}

/// Arguments for the interactive command.
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Show the per-component fee details after each change.
    #[arg(long)]
    pub detail: bool,
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated), e.g. rates.item_fee_cap.
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated), e.g. rates.payment_tiers.credit_6.
        key: String,
        /// Value to set.
        value: String,
    },
    /// Write a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
    /// Print which config file is in use.
    Path,
}

impl ConfigCommand {
    /// Whether the command writes the config file rather than reading it.
    pub fn edits_file(&self) -> bool {
        matches!(self, ConfigCommand::Init { .. } | ConfigCommand::Set { .. })
    }
}
