//! Fixtures
//!
//! YAML offer definitions. The built-in table is compiled into the binary.

use thiserror::Error;

use crate::{
    fixtures::offers::OffersFixture,
    offers::{OfferError, OfferTable},
};

pub mod offers;

const BUILTIN_OFFERS_YAML: &str = include_str!("../../fixtures/offers/default.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Number that cannot be represented as a decimal
    #[error("Invalid number in offer {code}: {value}")]
    InvalidNumber {
        /// Offer code holding the value
        code: String,
        /// Offending value
        value: f64,
    },

    /// Rule that fails validation
    #[error("Invalid offer {code}: {source}")]
    Offer {
        /// Offer code holding the rule
        code: String,
        /// Validation failure
        source: OfferError,
    },

    /// Table that fails validation
    #[error("Invalid offer table: {0}")]
    Table(#[from] OfferError),
}

/// Decodes an offer table from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or any rule fails validation.
pub fn load_offers(yaml: &str) -> Result<OfferTable, FixtureError> {
    let fixture: OffersFixture = serde_norway::from_str(yaml)?;

    let rules = fixture
        .offers
        .into_iter()
        .map(|(code, offer)| {
            let rule = offer.try_into_rule(&code)?;

            Ok((code, rule))
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;

    Ok(OfferTable::from_rules(rules)?)
}

/// Decodes the built-in offer table.
///
/// # Errors
///
/// Returns an error if the embedded definitions are invalid.
pub fn builtin_offers() -> Result<OfferTable, FixtureError> {
    load_offers(BUILTIN_OFFERS_YAML)
}
