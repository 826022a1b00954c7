use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How automatic rate selection is meant to behave.
///
/// Stored and round-tripped, but not consulted by
/// [`TaxCalculator::auto_select`](crate::TaxCalculator::auto_select) yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSelectionSettings {
    pub enabled: bool,
    pub criteria: SelectionCriteria,
}

impl Default for AutoSelectionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            criteria: SelectionCriteria::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionCriteria {
    pub region: Option<String>,
    pub category: Option<String>,
    /// Fraction used when no jurisdiction matches.
    pub fallback_rate: Option<Decimal>,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            region: Some(String::new()),
            category: Some("sales".to_string()),
            fallback_rate: Some(Decimal::new(5, 2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_settings_are_disabled_sales_with_five_percent_fallback() {
        let settings = AutoSelectionSettings::default();

        assert!(!settings.enabled);
        assert_eq!(settings.criteria.region.as_deref(), Some(""));
        assert_eq!(settings.criteria.category.as_deref(), Some("sales"));
        assert_eq!(settings.criteria.fallback_rate, Some(dec!(0.05)));
    }
}
