//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::packages::Package;

/// Surcharge per unit of weight.
pub const WEIGHT_RATE: Decimal = Decimal::TEN;

/// Surcharge per unit of distance.
pub const DISTANCE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Decimal places kept when applying a discount rate.
const RATE_SCALE: u32 = 12;

/// Errors that can occur while costing a delivery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostError {
    /// A tariff component was negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Name of the tariff component
        name: &'static str,
        /// Rejected value
        value: Decimal,
    },

    /// Cost arithmetic exceeded the decimal range.
    #[error("delivery cost for package {0} overflowed")]
    Overflow(String),
}

/// Base cost plus per-unit surcharges applied to every package in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    base_cost: Decimal,
    weight_rate: Decimal,
    distance_rate: Decimal,
}

impl Tariff {
    /// Creates a tariff with the standard weight and distance rates.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::Negative`] if `base_cost` is negative.
    pub fn new(base_cost: Decimal) -> Result<Self, CostError> {
        Self::with_rates(base_cost, WEIGHT_RATE, DISTANCE_RATE)
    }

    /// Creates a tariff with custom per-unit rates.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::Negative`] if any component is negative.
    pub fn with_rates(
        base_cost: Decimal,
        weight_rate: Decimal,
        distance_rate: Decimal,
    ) -> Result<Self, CostError> {
        for (name, value) in [
            ("base cost", base_cost),
            ("weight rate", weight_rate),
            ("distance rate", distance_rate),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CostError::Negative { name, value });
            }
        }

        Ok(Self {
            base_cost,
            weight_rate,
            distance_rate,
        })
    }

    /// Base cost charged per package.
    pub fn base_cost(&self) -> Decimal {
        self.base_cost
    }

    /// Delivery cost before any discount.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::Overflow`] if the cost exceeds the decimal range.
    pub fn raw_cost(&self, package: &Package) -> Result<Decimal, CostError> {
        let overflow = || CostError::Overflow(package.id().to_string());

        let weight_charge = package
            .weight()
            .checked_mul(self.weight_rate)
            .ok_or_else(overflow)?;

        let distance_charge = package
            .distance()
            .checked_mul(self.distance_rate)
            .ok_or_else(overflow)?;

        self.base_cost
            .checked_add(weight_charge)
            .and_then(|cost| cost.checked_add(distance_charge))
            .ok_or_else(overflow)
    }
}

/// Cost breakdown for a single package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryCost {
    /// Cost before discount
    pub raw: Decimal,

    /// Amount taken off by the offer
    pub discount: Decimal,

    /// Cost after discount
    pub total: Decimal,
}

/// Calculates the discounted delivery cost of a package.
///
/// Values keep full precision; truncation happens when rendering.
///
/// # Errors
///
/// Returns [`CostError::Overflow`] if any intermediate amount exceeds the decimal range.
pub fn calculate_cost(
    package: &Package,
    tariff: &Tariff,
    rate: Percentage,
) -> Result<DeliveryCost, CostError> {
    let raw = tariff.raw_cost(package)?;

    let discount = raw
        .checked_mul(rate_value(rate))
        .ok_or_else(|| CostError::Overflow(package.id().to_string()))?;

    let total = raw
        .checked_sub(discount)
        .ok_or_else(|| CostError::Overflow(package.id().to_string()))?;

    Ok(DeliveryCost {
        raw,
        discount,
        total,
    })
}

/// Converts a percentage to the fraction applied to costs.
pub(crate) fn rate_value(rate: Percentage) -> Decimal {
    (rate * Decimal::ONE).round_dp(RATE_SCALE)
}

/// Drops the fractional part of an amount, truncating toward zero.
pub fn whole_units(amount: Decimal) -> Decimal {
    amount.trunc()
}
