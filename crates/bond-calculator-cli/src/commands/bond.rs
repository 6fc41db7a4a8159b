use clap::Args;
use serde::de::DeserializeOwned;
use serde_json::Value;

use bond_calculator_core::day_count::{self, AccruedInterestInput, DayCountConvention};
use bond_calculator_core::engine::{self, ValuationRequest};
use bond_calculator_core::pricing::fixed::{self, FixedPriceInput};

use crate::input;

/// Arguments for a full bond valuation
#[derive(Args)]
pub struct ValueArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_value(args: ValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ValuationRequest = read_input(args.input.as_deref(), "bond valuation")?;
    let result = engine::value_bond(&request)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for fixed-leg pricing at a given yield
#[derive(Args)]
pub struct PriceArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_price(args: PriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let price_input: FixedPriceInput = read_input(args.input.as_deref(), "bond pricing")?;
    let price = fixed::price_from_input(&price_input);
    Ok(serde_json::json!({ "price": price }))
}

/// Arguments for accrued interest
#[derive(Args)]
pub struct AccruedArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
    /// Day count convention (30/360, ACT/360, ACT/365, ACT/ACT); overrides
    /// the day_count field of the JSON input
    #[arg(long)]
    pub convention: Option<String>,
}

pub fn run_accrued(args: AccruedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut accrued_input: AccruedInterestInput =
        read_input(args.input.as_deref(), "accrued interest")?;
    apply_convention(&mut accrued_input, args.convention.as_deref())?;
    let accrued = day_count::accrued_interest_from_input(&accrued_input);
    Ok(serde_json::json!({
        "accrued_interest": accrued,
        "day_count": accrued_input.day_count,
    }))
}

fn apply_convention(
    input: &mut AccruedInterestInput,
    convention: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(name) = convention {
        input.day_count = Some(name.parse::<DayCountConvention>()?);
    }
    Ok(())
}

/// Read a typed JSON input from `--input <file>` or piped stdin.
fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file.json> or stdin required for {what}").into())
    }
}
