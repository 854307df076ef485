//! feecalc - marketplace order fee calculator.
//!
//! Commands:
//! - `feecalc quote` - Compute fees, net proceeds and profit for one order
//! - `feecalc rates` - Show the fee schedule in effect
//! - `feecalc interactive` - Edit an order field by field and watch the totals
//! - `feecalc config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, InteractiveArgs, QuoteArgs, RatesArgs};

/// feecalc - Marketplace order fee calculator
#[derive(Parser)]
#[command(name = "feecalc")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote fees and proceeds for an order
    Quote(QuoteArgs),

    /// Show the fee schedule
    Rates(RatesArgs),

    /// Edit an order interactively
    Interactive(InteractiveArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let loaded = match cli.command {
        Commands::Config(ref args) if args.command.edits_file() => {
            context::Context::for_editing(cli.config.as_deref(), output.clone())
        }
        _ => context::Context::load(cli.config.as_deref(), output.clone()),
    };

    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Rates(args) => commands::rates::run(args, &ctx),
        Commands::Interactive(args) => commands::interactive::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
