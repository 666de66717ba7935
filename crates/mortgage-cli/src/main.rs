mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::{AmortizeArgs, DownPaymentArgs};

/// Fixed-rate mortgage amortization calculator
#[derive(Parser)]
#[command(
    name = "mortcalc",
    version,
    about = "Fixed-rate mortgage amortization calculator",
    long_about = "Computes the monthly payment of a fixed-rate mortgage with decimal \
                  precision: principal & interest, property tax, home insurance and PMI, \
                  plus lifetime interest and total cost."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the monthly payment and lifetime totals for a loan
    Amortize(AmortizeArgs),
    /// Down payment for a percentage of the home price
    DownPayment(DownPaymentArgs),
    /// List the standard loan terms and down payment presets
    Presets,
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
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::mortgage::run_amortize(args),
        Commands::DownPayment(args) => commands::mortgage::run_down_payment(args),
        Commands::Presets => commands::mortgage::run_presets(),
        Commands::Version => {
            println!("mortcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
