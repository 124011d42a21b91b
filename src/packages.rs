//! Packages

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of tokens that describe a single package.
pub const TOKENS_PER_PACKAGE: usize = 4;

/// Errors raised while turning raw tokens into packages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackageError {
    /// The token list does not hold exactly four tokens per expected package.
    #[error(
        "the number of packages provided does not match the expected count: expected {expected} tokens for the declared packages, got {actual}"
    )]
    CountMismatch {
        /// Number of tokens required by the declared package count
        expected: usize,
        /// Number of tokens actually supplied
        actual: usize,
    },

    /// The declared package count is too large to describe with tokens.
    #[error("package count {0} is too large")]
    TooManyPackages(usize),
}

/// Measure field that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureField {
    /// The weight token
    Weight,

    /// The distance token
    Distance,
}

/// A single package awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: String,
    weight: Decimal,
    distance: Decimal,
    offer_code: String,
}

impl Package {
    /// Creates a package from already-validated measures.
    pub fn new(
        id: impl Into<String>,
        weight: Decimal,
        distance: Decimal,
        offer_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            weight,
            distance,
            offer_code: offer_code.into(),
        }
    }

    /// Builds a package from an `[id, weight, distance, offer_code]` group.
    ///
    /// # Errors
    ///
    /// Returns the field that could not be read as a non-negative number.
    pub fn from_tokens<S: AsRef<str>>(
        id: &S,
        weight: &S,
        distance: &S,
        offer_code: &S,
    ) -> Result<Self, MeasureField> {
        let weight = parse_measure(weight.as_ref()).ok_or(MeasureField::Weight)?;
        let distance = parse_measure(distance.as_ref()).ok_or(MeasureField::Distance)?;

        Ok(Self::new(id.as_ref(), weight, distance, offer_code.as_ref()))
    }

    /// Returns the package id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the package weight.
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the delivery distance.
    pub fn distance(&self) -> Decimal {
        self.distance
    }

    /// Returns the offer code the package was submitted with.
    pub fn offer_code(&self) -> &str {
        &self.offer_code
    }
}

/// Parses a package count and its flat token list.
///
/// The token count is checked before anything is parsed; groups with a
/// malformed weight or distance are dropped.
///
/// # Errors
///
/// - [`PackageError::CountMismatch`]: `tokens` does not hold exactly four tokens per package.
/// - [`PackageError::TooManyPackages`]: `count` cannot be expressed as a token count.
pub fn parse_packages<S: AsRef<str>>(
    count: usize,
    tokens: &[S],
) -> Result<Vec<Package>, PackageError> {
    let expected = count
        .checked_mul(TOKENS_PER_PACKAGE)
        .ok_or(PackageError::TooManyPackages(count))?;

    if tokens.len() != expected {
        return Err(PackageError::CountMismatch {
            expected,
            actual: tokens.len(),
        });
    }

    Ok(group_packages(tokens))
}

/// Groups tokens into packages, four at a time.
///
/// A group whose weight or distance is not a number is skipped and grouping
/// carries on. A trailing group with fewer than four tokens stops grouping.
pub fn group_packages<S: AsRef<str>>(tokens: &[S]) -> Vec<Package> {
    let mut packages = Vec::with_capacity(tokens.len() / TOKENS_PER_PACKAGE);

    for (group, chunk) in tokens.chunks(TOKENS_PER_PACKAGE).enumerate() {
        let index = group * TOKENS_PER_PACKAGE;

        let [id, weight, distance, offer_code] = chunk else {
            warn!(index, remaining = chunk.len(), "incomplete package group");
            break;
        };

        match Package::from_tokens(id, weight, distance, offer_code) {
            Ok(package) => packages.push(package),
            Err(field) => {
                debug!(index, id = id.as_ref(), ?field, "skipping malformed package");
            }
        }
    }

    packages
}

/// Parses a plain decimal (`12.5`) or scientific (`1e2`) number.
///
/// Digit separators, hex and other forms `Decimal` would otherwise tolerate
/// are rejected, as are values outside the decimal range.
pub fn parse_number(token: &str) -> Option<Decimal> {
    if !is_plain_number(token) {
        return None;
    }

    Decimal::from_str(token)
        .or_else(|_err| Decimal::from_scientific(token))
        .ok()
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with digits on at least one side of the point.
fn is_plain_number(token: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);

    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mantissa_ok =
        !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction);

    let exponent_ok = exponent.is_none_or(|exponent| {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);

        !digits.is_empty() && all_digits(digits)
    });

    mantissa_ok && exponent_ok
}

/// Reads a weight or distance, rejecting negatives.
fn parse_measure(token: &str) -> Option<Decimal> {
    let value = parse_number(token)?;

    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }

    Some(value)
}
