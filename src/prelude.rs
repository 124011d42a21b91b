//! Delivery cost prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::{CalculatorError, DeliveryCalculator, PackageEstimate},
    discounts::{OfferMatch, match_offer, resolve_discount},
    fixtures::{FixtureError, builtin_offers, load_offers},
    offers::{Band, OfferError, OfferRule, OfferTable},
    packages::{Package, PackageError, group_packages, parse_number, parse_packages},
    pricing::{CostError, DeliveryCost, Tariff, calculate_cost, whole_units},
    receipt::{OutputFormat, ReceiptError, write_estimates, write_offers},
};
