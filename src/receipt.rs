//! Receipt
//!
//! Renders costed packages. The line format is `<id> <discount> <total>`, with
//! both amounts truncated to whole units.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    calculator::PackageEstimate,
    discounts::OfferMatch,
    offers::{Band, OfferTable},
    pricing::rate_value,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// How estimates are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `<id> <discount> <total>` line per package.
    #[default]
    Lines,

    /// A bordered table with the full cost breakdown.
    Table,
}

/// Writes estimates in the requested format, in input order.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if writing fails.
pub fn write_estimates(
    mut out: impl io::Write,
    estimates: &[PackageEstimate],
    format: OutputFormat,
) -> Result<(), ReceiptError> {
    match format {
        OutputFormat::Lines => {
            for estimate in estimates {
                writeln!(out, "{}", estimate_line(estimate))?;
            }
        }
        OutputFormat::Table => writeln!(out, "{}", estimates_table(estimates))?,
    }

    out.flush()?;

    Ok(())
}

/// Formats a single estimate as `<id> <discount> <total>`.
pub fn estimate_line(estimate: &PackageEstimate) -> String {
    format!(
        "{} {} {}",
        estimate.id(),
        estimate.discount_units(),
        estimate.total_units()
    )
}

/// Writes the offer codes in a table.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if writing fails.
pub fn write_offers(mut out: impl io::Write, offers: &OfferTable) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Code", "Discount", "Weight", "Distance"]);

    for (code, rule) in offers.iter_sorted() {
        builder.push_record([
            code.to_string(),
            percent_points(rule.discount()),
            band_display(rule.weight()),
            band_display(rule.distance()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..), Alignment::right());

    writeln!(out, "{table}")?;
    out.flush()?;

    Ok(())
}

fn estimates_table(estimates: &[PackageEstimate]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Package",
        "Offer",
        "Weight",
        "Distance",
        "Delivery Cost",
        "Discount",
        "Total",
    ]);

    for estimate in estimates {
        let package = estimate.package();

        builder.push_record([
            package.id().to_string(),
            offer_display(package.offer_code(), estimate.offer()),
            package.weight().normalize().to_string(),
            package.distance().normalize().to_string(),
            estimate.cost().raw.normalize().to_string(),
            estimate.discount_units().to_string(),
            estimate.total_units().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());

    table.to_string()
}

fn band_display(band: &Band) -> String {
    format!("{} - {}", band.min().normalize(), band.max().normalize())
}

fn offer_display(code: &str, offer: OfferMatch) -> String {
    match offer {
        OfferMatch::Applied(rate) => format!("{code} ({} off)", percent_points(rate)),
        OfferMatch::Ineligible => format!("{code} (not eligible)"),
        OfferMatch::UnknownCode => format!("{code} (unknown)"),
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(rate: Percentage) -> String {
    format!(
        "{}%",
        (rate_value(rate) * Decimal::ONE_HUNDRED).normalize()
    )
}
