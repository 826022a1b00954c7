//! Property-based tests for the calculator identities.
//!
//! Run with: `cargo test -p tax-rate-core --test calculator_properties`

use chrono::DateTime;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tax_rate_core::{TaxCalculator, TaxRate};

fn rate(value: Decimal) -> TaxRate {
    let at = DateTime::from_timestamp(0, 0).unwrap();
    TaxRate {
        id: "p".to_string(),
        name: "Property".to_string(),
        rate: value,
        created_at: at,
        updated_at: at,
    }
}

proptest! {
    #[test]
    fn tax_is_base_times_rate(
        cents in -10_000_000i64..10_000_000i64,
        basis_points in 0u32..=10_000u32,
    ) {
        let base = Decimal::new(cents, 2);
        let r = Decimal::new(basis_points as i64, 4);

        let result = TaxCalculator::compute(base, &rate(r)).unwrap();

        prop_assert_eq!(result.tax_amount, base * r);
        prop_assert_eq!(result.total_amount, base + base * r);
    }

    #[test]
    fn total_never_below_base_for_non_negative_inputs(
        cents in 0i64..10_000_000i64,
        basis_points in 0u32..=10_000u32,
    ) {
        let base = Decimal::new(cents, 2);
        let r = Decimal::new(basis_points as i64, 4);

        let result = TaxCalculator::compute(base, &rate(r)).unwrap();

        prop_assert!(result.total_amount >= base);
        prop_assert!(result.tax_amount <= base);
    }
}
