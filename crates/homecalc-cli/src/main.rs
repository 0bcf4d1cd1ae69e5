mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::{AffordabilityArgs, StressTestArgs};
use commands::insurance::{NeedsArgs, QuickNeedsArgs};
use commands::mortgage::{CmhcArgs, LttArgs, QuoteArgs};

/// Ontario home-buying and life-insurance calculations
#[derive(Parser)]
#[command(
    name = "homecalc",
    version,
    about = "Ontario home-buying and life-insurance calculations",
    long_about = "A CLI for Canadian (Ontario) personal-finance calculations with decimal \
                  precision. Supports mortgage quotes, CMHC premiums, land transfer tax, \
                  stress-tested affordability and DIME life-insurance needs analysis."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote payment, CMHC premium and closing cash for a purchase
    Quote(QuoteArgs),
    /// CMHC mortgage default insurance premium
    Cmhc(CmhcArgs),
    /// Ontario (and Toronto) land transfer tax
    Ltt(LttArgs),
    /// Maximum purchase price under the stress test and down payment rules
    Affordability(AffordabilityArgs),
    /// GDS/TDS ratios for a trial mortgage at the qualifying rate
    StressTest(StressTestArgs),
    /// Household life-insurance needs analysis (single or joint)
    Needs(NeedsArgs),
    /// One-screen DIME life-insurance estimate
    QuickNeeds(QuickNeedsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::mortgage::run_quote(args),
        Commands::Cmhc(args) => commands::mortgage::run_cmhc(args),
        Commands::Ltt(args) => commands::mortgage::run_ltt(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::StressTest(args) => commands::affordability::run_stress_test(args),
        Commands::Needs(args) => commands::insurance::run_needs(args),
        Commands::QuickNeeds(args) => commands::insurance::run_quick_needs(args),
        Commands::Version => {
            println!("homecalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
