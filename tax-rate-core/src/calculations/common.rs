//! Rounding helpers for presenting calculation results.
//!
//! The calculator itself never rounds; these are applied when values are
//! shown to a person.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_rate_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Expresses a fractional rate as a percentage with at most three decimal
/// places and no trailing zeros.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_rate_core::calculations::common::rate_as_percent;
///
/// assert_eq!(rate_as_percent(dec!(0.0825)).to_string(), "8.25");
/// assert_eq!(rate_as_percent(dec!(0.04)).to_string(), "4");
/// ```
pub fn rate_as_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(8.254));

        assert_eq!(result, dec!(8.25));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(8.255));

        assert_eq!(result, dec!(8.26));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-0.125));

        assert_eq!(result, dec!(-0.13));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(108.25));

        assert_eq!(result, dec!(108.25));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // rate_as_percent tests
    // =========================================================================

    #[test]
    fn rate_as_percent_keeps_three_places() {
        let result = rate_as_percent(dec!(0.01825));

        assert_eq!(result.to_string(), "1.825");
    }

    #[test]
    fn rate_as_percent_rounds_beyond_three_places() {
        let result = rate_as_percent(dec!(0.123456));

        assert_eq!(result.to_string(), "12.346");
    }

    #[test]
    fn rate_as_percent_strips_trailing_zeros() {
        let result = rate_as_percent(dec!(0.0700));

        assert_eq!(result.to_string(), "7");
    }

    #[test]
    fn rate_as_percent_of_zero_is_zero() {
        let result = rate_as_percent(dec!(0));

        assert_eq!(result.to_string(), "0");
    }
}
