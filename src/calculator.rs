//! Calculator
//!
//! Runs a batch of package tokens through parsing, offer matching and costing.
//! Parsing finishes before any package is costed, so a count mismatch aborts
//! the batch with nothing produced.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    discounts::{OfferMatch, match_offer},
    offers::OfferTable,
    packages::{Package, PackageError, parse_packages},
    pricing::{CostError, DeliveryCost, Tariff, calculate_cost, whole_units},
};

/// Errors that abort a batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculatorError {
    /// Package tokens were rejected.
    #[error(transparent)]
    Package(#[from] PackageError),
}

/// Costed package, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageEstimate {
    package: Package,
    offer: OfferMatch,
    cost: DeliveryCost,
}

impl PackageEstimate {
    /// The package that was costed.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Package id.
    pub fn id(&self) -> &str {
        self.package.id()
    }

    /// How the package's offer code matched.
    pub fn offer(&self) -> OfferMatch {
        self.offer
    }

    /// Full-precision cost breakdown.
    pub fn cost(&self) -> &DeliveryCost {
        &self.cost
    }

    /// Discount amount, truncated to whole units.
    pub fn discount_units(&self) -> Decimal {
        whole_units(self.cost.discount)
    }

    /// Total cost, truncated to whole units.
    pub fn total_units(&self) -> Decimal {
        whole_units(self.cost.total)
    }
}

/// Costs batches of packages against a tariff and an offer table.
#[derive(Debug, Clone)]
pub struct DeliveryCalculator {
    tariff: Tariff,
    offers: OfferTable,
}

impl DeliveryCalculator {
    /// Creates a calculator.
    pub fn new(tariff: Tariff, offers: OfferTable) -> Self {
        Self { tariff, offers }
    }

    /// The tariff packages are costed with.
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// The offer codes packages are matched against.
    pub fn offers(&self) -> &OfferTable {
        &self.offers
    }

    /// Costs a single package.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::Overflow`] if the cost exceeds the decimal range.
    pub fn estimate(&self, package: Package) -> Result<PackageEstimate, CostError> {
        let offer = match_offer(&package, &self.offers);
        let cost = calculate_cost(&package, &self.tariff, offer.rate())?;

        Ok(PackageEstimate {
            package,
            offer,
            cost,
        })
    }

    /// Costs already-parsed packages, keeping their order.
    ///
    /// A package whose cost exceeds the decimal range is left out, like a
    /// malformed group.
    pub fn estimate_all(
        &self,
        packages: impl IntoIterator<Item = Package>,
    ) -> Vec<PackageEstimate> {
        packages
            .into_iter()
            .filter_map(|package| match self.estimate(package) {
                Ok(estimate) => Some(estimate),
                Err(error) => {
                    warn!(%error, "skipping package");

                    None
                }
            })
            .collect()
    }

    /// Parses `count` packages from `tokens` and costs them.
    ///
    /// Malformed groups and packages that cannot be costed are left out of
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::Package`] if the token count does not match `count`.
    pub fn calculate<S: AsRef<str>>(
        &self,
        count: usize,
        tokens: &[S],
    ) -> Result<Vec<PackageEstimate>, CalculatorError> {
        let packages = parse_packages(count, tokens)?;

        info!(expected = count, parsed = packages.len(), "parsed packages");

        Ok(self.estimate_all(packages))
    }
}
