//! Offer Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    offers::{Band, OfferRule},
};

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Map of offer code -> offer fixture
    pub offers: FxHashMap<String, OfferFixture>,
}

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferFixture {
    /// Discount rate as decimal (e.g., 0.10 for 10%)
    pub discount: f64,

    /// Inclusive weight band
    pub weight: BandFixture,

    /// Inclusive distance band
    pub distance: BandFixture,
}

/// Inclusive band from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandFixture {
    /// Lower bound
    pub min: f64,

    /// Upper bound
    pub max: f64,
}

impl OfferFixture {
    /// Convert to an [`OfferRule`]
    ///
    /// # Errors
    ///
    /// Returns an error if a number is not finite or the rule is invalid.
    pub fn try_into_rule(self, code: &str) -> Result<OfferRule, FixtureError> {
        if !self.discount.is_finite() {
            return Err(FixtureError::InvalidNumber {
                code: code.to_string(),
                value: self.discount,
            });
        }

        let weight = self.weight.try_into_band(code)?;
        let distance = self.distance.try_into_band(code)?;

        OfferRule::new(Percentage::from(self.discount), weight, distance).map_err(|source| {
            FixtureError::Offer {
                code: code.to_string(),
                source,
            }
        })
    }
}

impl BandFixture {
    fn try_into_band(self, code: &str) -> Result<Band, FixtureError> {
        let min = to_decimal(code, self.min)?;
        let max = to_decimal(code, self.max)?;

        Band::new(min, max).map_err(|source| FixtureError::Offer {
            code: code.to_string(),
            source,
        })
    }
}

fn to_decimal(code: &str, value: f64) -> Result<Decimal, FixtureError> {
    Decimal::from_f64(value).ok_or_else(|| FixtureError::InvalidNumber {
        code: code.to_string(),
        value,
    })
}
