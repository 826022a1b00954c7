use rust_decimal::Decimal;
use thiserror::Error;

/// Form-level validation failures for tax rate input.
///
/// The store never produces these; they are raised at the entry boundary
/// before data is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Rate must be positive")]
    NegativeRate,

    #[error("Rate must be less than 100%")]
    RateTooHigh,
}

/// Converts a rate entered as a percentage into a fraction.
///
/// Any value greater than 1 is taken to be a percentage and divided by 100;
/// values in `[0, 1]` (and negatives) are returned unchanged.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_rate_core::normalize_rate;
///
/// assert_eq!(normalize_rate(dec!(8.25)), dec!(0.0825));
/// assert_eq!(normalize_rate(dec!(0.0825)), dec!(0.0825));
/// assert_eq!(normalize_rate(dec!(1)), dec!(1));
/// ```
pub fn normalize_rate(rate: Decimal) -> Decimal {
    if rate > Decimal::ONE {
        rate / Decimal::ONE_HUNDRED
    } else {
        rate
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Checks a rate that is already a fraction; `[0, 1]` is accepted.
pub fn validate_rate(rate: Decimal) -> Result<(), ValidationError> {
    if rate < Decimal::ZERO {
        Err(ValidationError::NegativeRate)
    } else if rate > Decimal::ONE {
        Err(ValidationError::RateTooHigh)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn normalize_rate_divides_values_above_one() {
        assert_eq!(normalize_rate(dec!(7.25)), dec!(0.0725));
        assert_eq!(normalize_rate(dec!(100)), dec!(1));
    }

    #[test]
    fn normalize_rate_leaves_fractions_alone() {
        assert_eq!(normalize_rate(dec!(0)), dec!(0));
        assert_eq!(normalize_rate(dec!(0.5)), dec!(0.5));
        assert_eq!(normalize_rate(dec!(1)), dec!(1));
    }

    #[test]
    fn normalize_rate_leaves_negatives_alone() {
        assert_eq!(normalize_rate(dec!(-5)), dec!(-5));
    }

    #[test]
    fn validate_rate_bounds_are_inclusive() {
        assert_eq!(validate_rate(dec!(0)), Ok(()));
        assert_eq!(validate_rate(dec!(1)), Ok(()));
        assert_eq!(validate_rate(dec!(1.0001)), Err(ValidationError::RateTooHigh));
        assert_eq!(validate_rate(dec!(-0.0001)), Err(ValidationError::NegativeRate));
    }

    #[test]
    fn validate_name_rejects_whitespace() {
        assert_eq!(validate_name(" \t"), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("VAT"), Ok(()));
    }

    #[test]
    fn error_messages_match_form_text() {
        assert_eq!(ValidationError::EmptyName.to_string(), "Name is required");
        assert_eq!(ValidationError::RateTooHigh.to_string(), "Rate must be less than 100%");
    }
}
