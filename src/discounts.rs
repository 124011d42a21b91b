//! Discounts

use decimal_percentage::Percentage;
use tracing::debug;

use crate::{offers::OfferTable, packages::Package};

/// Outcome of matching a package's offer code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfferMatch {
    /// The code is not in the offer table.
    UnknownCode,

    /// The code exists but the package falls outside its bands.
    Ineligible,

    /// The package qualifies for the offer's rate.
    Applied(Percentage),
}

impl OfferMatch {
    /// Discount rate for this outcome, zero unless applied.
    pub fn rate(self) -> Percentage {
        match self {
            OfferMatch::Applied(rate) => rate,
            OfferMatch::UnknownCode | OfferMatch::Ineligible => Percentage::from(0.0),
        }
    }
}

/// Matches a package against the offer table.
pub fn match_offer(package: &Package, offers: &OfferTable) -> OfferMatch {
    let outcome = match offers.get(package.offer_code()) {
        None => OfferMatch::UnknownCode,
        Some(rule) if rule.is_eligible(package) => OfferMatch::Applied(rule.discount()),
        Some(_) => OfferMatch::Ineligible,
    };

    debug!(
        id = package.id(),
        offer_code = package.offer_code(),
        ?outcome,
        "resolved offer"
    );

    outcome
}

/// Resolves the discount rate for a package.
///
/// Unknown codes and packages outside the offer's bands get no discount.
pub fn resolve_discount(package: &Package, offers: &OfferTable) -> Percentage {
    match_offer(package, offers).rate()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::fixtures::builtin_offers;

    use super::*;

    fn package(weight: i64, distance: i64, code: &str) -> Package {
        Package::new("PKG", Decimal::from(weight), Decimal::from(distance), code)
    }

    #[test]
    fn unknown_code_gets_no_discount() -> TestResult {
        let offers = builtin_offers()?;

        let outcome = match_offer(&package(100, 100, "OFR999"), &offers);

        assert_eq!(outcome, OfferMatch::UnknownCode);
        assert_eq!(outcome.rate(), Percentage::from(0.0));

        Ok(())
    }

    #[test]
    fn ineligible_package_gets_no_discount() -> TestResult {
        let offers = builtin_offers()?;

        let outcome = match_offer(&package(5, 5, "OFR001"), &offers);

        assert_eq!(outcome, OfferMatch::Ineligible);
        assert_eq!(
            resolve_discount(&package(5, 5, "OFR001"), &offers),
            Percentage::from(0.0)
        );

        Ok(())
    }

    #[test]
    fn eligible_package_gets_offer_rate() -> TestResult {
        let offers = builtin_offers()?;

        assert_eq!(
            resolve_discount(&package(10, 100, "OFR003"), &offers),
            Percentage::from(0.05)
        );
        assert_eq!(
            resolve_discount(&package(110, 60, "OFR002"), &offers),
            Percentage::from(0.07)
        );

        Ok(())
    }

    #[test]
    fn band_edges_are_inclusive() -> TestResult {
        let offers = builtin_offers()?;

        assert_eq!(
            resolve_discount(&package(70, 200, "OFR001"), &offers),
            Percentage::from(0.10)
        );
        assert_eq!(
            resolve_discount(&package(200, 0, "OFR001"), &offers),
            Percentage::from(0.10)
        );
        assert_eq!(
            resolve_discount(&package(201, 0, "OFR001"), &offers),
            Percentage::from(0.0)
        );

        Ok(())
    }

    #[test]
    fn empty_table_never_discounts() {
        let offers = OfferTable::empty();

        assert_eq!(
            match_offer(&package(100, 100, "OFR001"), &offers),
            OfferMatch::UnknownCode
        );
    }
}
