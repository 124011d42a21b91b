//! Command-line interface

use std::io;

use clap::Parser;
use delivery_cost::{
    calculator::{CalculatorError, DeliveryCalculator},
    fixtures::FixtureError,
    offers::OfferTable,
    packages::parse_number,
    pricing::{CostError, Tariff},
    receipt::{OutputFormat, ReceiptError, write_estimates, write_offers},
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::logging::LoggingConfig;

#[derive(Debug, Parser)]
#[command(
    name = "delivery-cost",
    version,
    about = "Calculates the total delivery cost of a batch of packages",
    long_about = None
)]
pub(crate) struct Cli {
    /// Base delivery cost
    #[arg(
        value_parser = parse_base_cost,
        required_unless_present = "list_offers",
        allow_negative_numbers = true
    )]
    base_cost: Option<Decimal>,

    /// Number of packages
    #[arg(required_unless_present = "list_offers")]
    package_count: Option<usize>,

    /// Package details, four values per package: ID WEIGHT DISTANCE OFFER_CODE
    #[arg(allow_negative_numbers = true)]
    packages: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,

    /// List the available offer codes and exit
    #[arg(long)]
    list_offers: bool,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,
}

/// Errors that end a run with a failure exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("base cost and package count are required")]
    MissingArguments,

    #[error("failed to load offer codes: {0}")]
    Offers(#[from] FixtureError),

    #[error(transparent)]
    Tariff(#[from] CostError),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

impl Cli {
    pub(crate) fn run(self, out: impl io::Write) -> Result<(), CliError> {
        let offers = OfferTable::builtin()?;

        if self.list_offers {
            write_offers(out, &offers)?;

            return Ok(());
        }

        let (Some(base_cost), Some(package_count)) = (self.base_cost, self.package_count) else {
            return Err(CliError::MissingArguments);
        };

        let calculator = DeliveryCalculator::new(Tariff::new(base_cost)?, offers);
        let estimates = calculator.calculate(package_count, &self.packages)?;

        write_estimates(out, &estimates, self.format)?;

        Ok(())
    }
}

fn parse_base_cost(value: &str) -> Result<Decimal, String> {
    let cost = parse_number(value).ok_or_else(|| format!("invalid base cost `{value}`"))?;

    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(format!("base cost must not be negative, got {cost}"));
    }

    Ok(cost)
}
