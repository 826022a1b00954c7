//! Plain-text renderings of store and calculator results.

use std::fmt;

use tax_rate_core::{AutoSelectionSettings, Calculation, TaxRate};

use crate::utils::{format_currency, format_rate, opt_display};

/// The rate list: name, percentage, id and last update.
pub struct RateTable<'a>(pub &'a [TaxRate]);

impl fmt::Display for RateTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tax rates configured.");
        }

        let rows: Vec<_> = self
            .0
            .iter()
            .map(|r| {
                (
                    r.name.as_str(),
                    format_rate(r.rate),
                    r.id.as_str(),
                    r.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                )
            })
            .collect();

        let name_w = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0).max(4);
        let rate_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(4);
        let id_w = rows.iter().map(|r| r.2.len()).max().unwrap_or(0).max(2);

        writeln!(f, "{:<name_w$}  {:>rate_w$}  {:<id_w$}  UPDATED", "NAME", "RATE", "ID")?;
        for (name, rate, id, updated) in &rows {
            writeln!(f, "{name:<name_w$}  {rate:>rate_w$}  {id:<id_w$}  {updated}")?;
        }
        Ok(())
    }
}

/// One calculation result as shown after `calc`.
pub struct CalculationSummary<'a> {
    pub calculation: &'a Calculation,
    pub currency: &'a str,
}

impl fmt::Display for CalculationSummary<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let calc = self.calculation;
        let how = if calc.auto_selected { " [auto-selected]" } else { "" };
        writeln!(
            f,
            "Rate:   {} ({}){how}",
            calc.applied_rate.name,
            format_rate(calc.applied_rate.rate)
        )?;
        writeln!(f, "Base:   {}", format_currency(calc.base_amount, self.currency))?;
        writeln!(
            f,
            "Tax:    {}",
            format_currency(calc.breakdown.tax_amount, self.currency)
        )?;
        writeln!(
            f,
            "Total:  {}",
            format_currency(calc.breakdown.total_amount, self.currency)
        )
    }
}

pub struct SettingsSummary<'a>(pub &'a AutoSelectionSettings);

impl fmt::Display for SettingsSummary<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let criteria = &self.0.criteria;
        writeln!(f, "Auto-selection: {}", if self.0.enabled { "enabled" } else { "disabled" })?;
        writeln!(f, "  Region:        {}", opt_display(&criteria.region))?;
        writeln!(f, "  Category:      {}", opt_display(&criteria.category))?;
        writeln!(
            f,
            "  Fallback rate: {}",
            opt_display(&criteria.fallback_rate.map(format_rate))
        )?;
        writeln!(f, "  (auto-select currently always uses the first listed rate)")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_rate_core::{InMemoryTaxRateStore, RateSelection, TaxCalculator, TaxRateRepository};

    use super::*;

    #[test]
    fn empty_table_says_so() {
        assert_eq!(RateTable(&[]).to_string(), "No tax rates configured.\n");
    }

    #[test]
    fn table_lists_seed_rates() {
        let store = InMemoryTaxRateStore::with_defaults();
        let rates = store.list_all();

        let text = RateTable(&rates).to_string();

        let expected = "\
NAME                   RATE  ID  UPDATED
California Sales Tax  7.25%  1   2024-01-01 00:00
New York Income Tax      4%  2   2024-01-01 00:00
Texas Property Tax    1.83%  3   2024-01-01 00:00
";
        assert_eq!(text, expected);
    }

    #[test]
    fn calculation_summary_formats_amounts() {
        let store = InMemoryTaxRateStore::with_defaults();
        let calc = TaxCalculator::calculate(&store, dec!(200), &RateSelection::Auto).unwrap();

        let text = CalculationSummary {
            calculation: &calc,
            currency: "$",
        }
        .to_string();

        let expected = "\
Rate:   California Sales Tax (7.25%) [auto-selected]
Base:   $200.00
Tax:    $14.50
Total:  $214.50
";
        assert_eq!(text, expected);
    }

    #[test]
    fn settings_summary_shows_defaults() {
        let text = SettingsSummary(&AutoSelectionSettings::default()).to_string();

        assert!(text.starts_with("Auto-selection: disabled\n"));
        assert!(text.contains("Category:      sales"));
        assert!(text.contains("Fallback rate: 5%"));
    }
}
