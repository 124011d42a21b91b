//! Offers
//!
//! Offer codes map to a discount rate gated by inclusive weight and distance
//! bands. The table is plain data handed to the resolver, so callers can swap
//! the built-in codes for any rule set.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    fixtures::{self, FixtureError},
    packages::Package,
    pricing::rate_value,
};

/// Errors raised while building offer rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferError {
    /// Discount rate must be a fraction between 0 and 1.
    #[error("discount rate {0} is outside [0, 1]")]
    InvalidDiscount(Decimal),

    /// Band lower bound exceeds its upper bound.
    #[error("band minimum {min} exceeds maximum {max}")]
    InvalidBand {
        /// Lower bound
        min: Decimal,
        /// Upper bound
        max: Decimal,
    },

    /// The same offer code was defined twice.
    #[error("duplicate offer code: {0}")]
    DuplicateCode(String),
}

/// Inclusive range of weights or distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    min: Decimal,
    max: Decimal,
}

impl Band {
    /// Creates a band covering `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::InvalidBand`] if `min` is greater than `max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, OfferError> {
        if min > max {
            return Err(OfferError::InvalidBand { min, max });
        }

        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Whether `value` lies within the band, bounds included.
    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Discount rule attached to an offer code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferRule {
    discount: Percentage,
    weight: Band,
    distance: Band,
}

impl OfferRule {
    /// Creates a rule granting `discount` to packages inside both bands.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::InvalidDiscount`] if the rate is negative or above 100%.
    pub fn new(discount: Percentage, weight: Band, distance: Band) -> Result<Self, OfferError> {
        let rate = rate_value(discount);

        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(OfferError::InvalidDiscount(rate));
        }

        Ok(Self {
            discount,
            weight,
            distance,
        })
    }

    /// Discount rate granted to eligible packages.
    pub fn discount(&self) -> Percentage {
        self.discount
    }

    /// Weight band.
    pub fn weight(&self) -> &Band {
        &self.weight
    }

    /// Distance band.
    pub fn distance(&self) -> &Band {
        &self.distance
    }

    /// Whether the package's weight and distance both fall within the rule's bands.
    pub fn is_eligible(&self, package: &Package) -> bool {
        self.weight.contains(package.weight()) && self.distance.contains(package.distance())
    }
}

/// Lookup table from offer code to rule.
#[derive(Debug, Clone, Default)]
pub struct OfferTable {
    rules: FxHashMap<String, OfferRule>,
}

impl OfferTable {
    /// Creates a table with no offer codes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table from `(code, rule)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::DuplicateCode`] if a code appears more than once.
    pub fn from_rules<I, K>(rules: I) -> Result<Self, OfferError>
    where
        I: IntoIterator<Item = (K, OfferRule)>,
        K: Into<String>,
    {
        let mut table = FxHashMap::default();

        for (code, rule) in rules {
            let code = code.into();

            if table.contains_key(&code) {
                return Err(OfferError::DuplicateCode(code));
            }

            table.insert(code, rule);
        }

        Ok(Self { rules: table })
    }

    /// The built-in offer codes.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the embedded offer definitions are invalid.
    pub fn builtin() -> Result<Self, FixtureError> {
        fixtures::builtin_offers()
    }

    /// Looks up a rule by exact offer code.
    pub fn get(&self, code: &str) -> Option<&OfferRule> {
        self.rules.get(code)
    }

    /// Number of offer codes.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no offer codes.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Offer codes and rules, sorted by code.
    pub fn iter_sorted(&self) -> Vec<(&str, &OfferRule)> {
        let mut entries: Vec<_> = self
            .rules
            .iter()
            .map(|(code, rule)| (code.as_str(), rule))
            .collect();

        entries.sort_unstable_by_key(|(code, _rule)| *code);

        entries
    }
}
