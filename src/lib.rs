//! Delivery Cost
//!
//! Delivery cost estimation for batches of packages, with offer-code discounts
//! gated by weight and distance bands.

pub mod calculator;
pub mod discounts;
pub mod fixtures;
pub mod offers;
pub mod packages;
pub mod prelude;
pub mod pricing;
pub mod receipt;
