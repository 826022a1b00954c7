use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use tax_rate_core::{InMemoryTaxRateStore, RateSelection, TaxCalculator, TaxRateRepository};
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::csv_loader;
use crate::shell::Shell;
use crate::utils::parse_decimal;
use crate::views::{CalculationSummary, RateTable};

/// Build the store the process will work against.
///
/// The built-in rates are seeded when the config asks for them and
/// `no_defaults` is not set; the config's auto-selection settings are applied
/// either way.
pub fn build_store(
    config: &AppConfig,
    no_defaults: bool,
) -> InMemoryTaxRateStore {
    let mut store = InMemoryTaxRateStore::new();
    if config.seed_defaults && !no_defaults {
        store.seed_defaults();
    }
    store.update_auto_selection_settings(config.auto_selection.clone());
    debug!(rates = store.len(), "store ready");
    store
}

/// Load `path` as CSV and append every row to `repo`. Nothing is added when
/// any row is invalid.
pub fn import_rates<R: TaxRateRepository + ?Sized>(
    repo: &mut R,
    path: &Path,
) -> anyhow::Result<usize> {
    let rates = csv_loader::load_from_file(path)?;
    let created = csv_loader::import_into(repo, rates);
    info!(path = %path.display(), count = created.len(), "import complete");
    Ok(created.len())
}

/// Run one top-level command. `input` feeds the interactive shell.
pub fn run_command<R, I, O>(
    command: Command,
    repo: &mut R,
    config: &AppConfig,
    input: I,
    mut out: O,
) -> anyhow::Result<()>
where
    R: TaxRateRepository + ?Sized,
    I: BufRead,
    O: Write,
{
    match command {
        Command::List => {
            write!(out, "{}", RateTable(&repo.list_all()))?;
        }
        Command::Calc { amount, rate_id } => {
            let base_amount = parse_decimal(&amount)?;
            let selection = rate_id
                .as_deref()
                .map(RateSelection::from)
                .unwrap_or_default();
            let calculation = TaxCalculator::calculate(&*repo, base_amount, &selection)
                .context("Failed to calculate tax")?;
            write!(
                out,
                "{}",
                CalculationSummary {
                    calculation: &calculation,
                    currency: &config.currency_symbol,
                }
            )?;
        }
        Command::Shell => {
            Shell::new(repo, &config.currency_symbol).run(input, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn run(
        command: Command,
        store: &mut InMemoryTaxRateStore,
        config: &AppConfig,
    ) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run_command(command, store, config, Cursor::new(""), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn build_store_seeds_by_default() {
        let store = build_store(&AppConfig::default(), false);

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn no_defaults_flag_wins_over_config() {
        let store = build_store(&AppConfig::default(), true);

        assert!(store.is_empty());
    }

    #[test]
    fn config_can_disable_seeding_and_set_auto_selection() {
        let mut config = AppConfig::default();
        config.seed_defaults = false;
        config.auto_selection.enabled = true;
        config.auto_selection.criteria.fallback_rate = Some(dec!(0.06));

        let store = build_store(&config, false);

        assert!(store.is_empty());
        assert_eq!(store.auto_selection_settings(), config.auto_selection);
    }

    #[test]
    fn calc_command_auto_selects() {
        let mut store = build_store(&AppConfig::default(), false);
        let command = Command::Calc {
            amount: "200".to_string(),
            rate_id: None,
        };

        let out = run(command, &mut store, &AppConfig::default()).unwrap();

        assert!(out.contains("[auto-selected]"));
        assert!(out.contains("Total:  $214.50"));
    }

    #[test]
    fn calc_command_uses_currency_symbol() {
        let mut store = build_store(&AppConfig::default(), false);
        let config = AppConfig {
            currency_symbol: "€".to_string(),
            ..AppConfig::default()
        };
        let command = Command::Calc {
            amount: "100".to_string(),
            rate_id: Some("3".to_string()),
        };

        let out = run(command, &mut store, &config).unwrap();

        assert!(out.contains("Tax:    €1.83"));
        assert!(!out.contains("auto-selected"));
    }

    #[test]
    fn calc_command_unknown_rate_is_an_error() {
        let mut store = build_store(&AppConfig::default(), false);
        let command = Command::Calc {
            amount: "100".to_string(),
            rate_id: Some("missing".to_string()),
        };

        let err = run(command, &mut store, &AppConfig::default()).unwrap_err();

        assert_eq!(format!("{err:#}"), "Failed to calculate tax: tax rate 'missing' not found");
    }

    #[test]
    fn calc_command_overflow_is_an_error() {
        let mut store = build_store(&AppConfig::default(), false);
        let command = Command::Calc {
            amount: "79,228,162,514,264,337,593,543,950,335".to_string(),
            rate_id: None,
        };

        let err = run(command, &mut store, &AppConfig::default()).unwrap_err();

        assert_eq!(
            format!("{err:#}"),
            "Failed to calculate tax: amount too large to calculate tax on"
        );
    }

    #[test]
    fn list_command_on_empty_store() {
        let mut store = InMemoryTaxRateStore::new();

        let out = run(Command::List, &mut store, &AppConfig::default()).unwrap();

        assert_eq!(out, "No tax rates configured.\n");
    }

    #[test]
    fn shell_command_reads_from_input() {
        let mut store = InMemoryTaxRateStore::new();
        let mut out = Vec::new();

        run_command(
            Command::Shell,
            &mut store,
            &AppConfig::default(),
            Cursor::new("add Local 2.5\n"),
            &mut out,
        )
        .unwrap();

        assert_eq!(store.list_all()[0].rate, dec!(0.025));
    }
}
