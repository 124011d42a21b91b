//! Integration tests for costing whole batches of packages.
//!
//! Worked example with a base cost of 100:
//!
//! 1. PKG1 (weight 5, distance 5, OFR001)
//!    - Raw: 100 + 50 + 25 = 175
//!    - OFR001 needs weight 70-200, so no discount
//!
//! 2. PKG2 (weight 15, distance 5, OFR002)
//!    - Raw: 100 + 150 + 25 = 275
//!    - OFR002 needs weight 100-250, so no discount
//!
//! 3. PKG3 (weight 10, distance 100, OFR003)
//!    - Raw: 100 + 100 + 500 = 700
//!    - OFR003 covers weight 10-150 and distance 50-250: 5% off = 35
//!    - Total: 665

use rust_decimal::Decimal;
use testresult::TestResult;

use delivery_cost::prelude::*;

const SAMPLE_TOKENS: [&str; 12] = [
    "PKG1", "5", "5", "OFR001", "PKG2", "15", "5", "OFR002", "PKG3", "10", "100", "OFR003",
];

fn builtin_calculator(base_cost: i64) -> TestResult<DeliveryCalculator> {
    Ok(DeliveryCalculator::new(
        Tariff::new(Decimal::from(base_cost))?,
        OfferTable::builtin()?,
    ))
}

fn render(estimates: &[PackageEstimate]) -> TestResult<String> {
    let mut out = Vec::new();

    write_estimates(&mut out, estimates, OutputFormat::Lines)?;

    Ok(String::from_utf8(out)?)
}

#[test]
fn sample_batch_matches_expected_lines() -> TestResult {
    let calculator = builtin_calculator(100)?;

    let estimates = calculator.calculate(3, &SAMPLE_TOKENS)?;

    assert_eq!(
        render(&estimates)?,
        "PKG1 0 175\nPKG2 0 275\nPKG3 35 665\n"
    );

    Ok(())
}

#[test]
fn repeated_runs_produce_identical_output() -> TestResult {
    let calculator = builtin_calculator(100)?;

    let first = render(&calculator.calculate(3, &SAMPLE_TOKENS)?)?;
    let second = render(&calculator.calculate(3, &SAMPLE_TOKENS)?)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn count_mismatch_fails_before_costing() -> TestResult {
    let calculator = builtin_calculator(100)?;
    let tokens = ["PKG1", "5", "5", "OFR001", "PKG2", "15", "5"];

    let result = calculator.calculate(2, &tokens);

    assert!(matches!(
        result,
        Err(CalculatorError::Package(PackageError::CountMismatch {
            expected: 8,
            actual: 7
        }))
    ));

    Ok(())
}

#[test]
fn malformed_weight_drops_only_that_package() -> TestResult {
    let calculator = builtin_calculator(100)?;
    let tokens = [
        "PKG1", "5", "5", "OFR001", "PKG2", "fifteen", "5", "OFR002", "PKG3", "10", "100",
        "OFR003",
    ];

    let estimates = calculator.calculate(3, &tokens)?;

    assert_eq!(render(&estimates)?, "PKG1 0 175\nPKG3 35 665\n");

    Ok(())
}

#[test]
fn separated_or_oversized_packages_are_dropped() -> TestResult {
    let calculator = builtin_calculator(100)?;
    let tokens = [
        "A", "1_0", "5", "OFR001", "B", "70000000000000000000000000000", "0", "OFR001", "C",
        "10", "100", "OFR003",
    ];

    let estimates = calculator.calculate(3, &tokens)?;

    assert_eq!(render(&estimates)?, "C 35 665\n");

    Ok(())
}

#[test]
fn unknown_codes_pay_raw_cost() -> TestResult {
    let calculator = builtin_calculator(100)?;
    let tokens = ["A", "100", "100", "OFR999", "B", "100", "100", "ofr001"];

    let estimates = calculator.calculate(2, &tokens)?;

    for estimate in &estimates {
        assert_eq!(estimate.offer(), OfferMatch::UnknownCode);
        assert_eq!(estimate.cost().discount, Decimal::ZERO);
        assert_eq!(estimate.cost().total, estimate.cost().raw);
    }

    assert_eq!(render(&estimates)?, "A 0 1600\nB 0 1600\n");

    Ok(())
}

#[test]
fn band_edges_qualify_for_discount() -> TestResult {
    let calculator = builtin_calculator(0)?;
    let tokens = [
        "MIN", "70", "100", "OFR001", "MAX", "200", "100", "OFR001", "OVER", "200.01", "100",
        "OFR001",
    ];

    let estimates = calculator.calculate(3, &tokens)?;

    // 70 * 10 + 100 * 5 = 1200, 10% off
    // 200 * 10 + 100 * 5 = 2500, 10% off
    // 200.01 * 10 + 100 * 5 = 2500.1, ineligible
    assert_eq!(render(&estimates)?, "MIN 120 1080\nMAX 250 2250\nOVER 0 2500\n");

    Ok(())
}

#[test]
fn discount_stays_within_raw_cost() -> TestResult {
    let calculator = builtin_calculator(37)?;
    let tokens = [
        "A", "0", "0", "OFR001", "B", "70", "0", "OFR001", "C", "150", "150", "OFR002", "D",
        "12.345", "67.89", "OFR003",
    ];

    let estimates = calculator.calculate(4, &tokens)?;

    assert_eq!(estimates.len(), 4);

    for estimate in &estimates {
        let cost = estimate.cost();

        assert!(cost.discount >= Decimal::ZERO, "negative discount");
        assert!(cost.discount <= cost.raw, "discount above raw cost");
        assert!(cost.total >= Decimal::ZERO, "negative total");
    }

    Ok(())
}

#[test]
fn fractional_amounts_are_truncated() -> TestResult {
    let calculator = builtin_calculator(0)?;

    // 12.345 * 10 + 67.89 * 5 = 462.9, 5% off = 23.145, total 439.755
    let estimates = calculator.calculate(1, &["D", "12.345", "67.89", "OFR003"])?;

    assert_eq!(render(&estimates)?, "D 23 439\n");

    Ok(())
}

#[test]
fn synthetic_offer_table_replaces_builtin_codes() -> TestResult {
    let offers = load_offers(
        r"
offers:
  FREE:
    discount: 1.0
    weight: { min: 0, max: 1000 }
    distance: { min: 0, max: 1000 }
",
    )?;
    let calculator = DeliveryCalculator::new(Tariff::new(Decimal::from(100))?, offers);

    let estimates = calculator.calculate(2, &["A", "10", "10", "FREE", "B", "10", "10", "OFR001"])?;

    assert_eq!(render(&estimates)?, "A 250 0\nB 0 250\n");

    Ok(())
}

#[test]
fn empty_batch_renders_nothing() -> TestResult {
    let calculator = builtin_calculator(100)?;
    let tokens: [&str; 0] = [];

    let estimates = calculator.calculate(0, &tokens)?;

    assert!(estimates.is_empty());
    assert_eq!(render(&estimates)?, "");

    Ok(())
}
