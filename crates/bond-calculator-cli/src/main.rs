mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::bond::{AccruedArgs, PriceArgs, ValueArgs};

/// Fixed-income bond valuation
#[derive(Parser)]
#[command(
    name = "bondcalc",
    version,
    about = "Fixed-income bond valuation with decimal precision",
    long_about = "A CLI for valuing bullet and callable fixed-coupon bonds: \
                  yield to maturity and yield to call via Newton-Raphson, \
                  accrued interest under multiple day count conventions, \
                  PV01/DV01/modified duration, and floating-rate pricing."
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
    /// Full valuation: YTM, price, accrued, risk metrics, optional YTC and floating leg
    Value(ValueArgs),
    /// Price a fixed-coupon bond at a given yield
    Price(PriceArgs),
    /// Accrued interest, plain or under a day count convention
    Accrued(AccruedArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Value(args) => commands::bond::run_value(args),
        Commands::Price(args) => commands::bond::run_price(args),
        Commands::Accrued(args) => commands::bond::run_accrued(args),
        Commands::Version => {
            println!("bondcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
