//! A full shell session driven through `run_command`, as `tax-rates shell`
//! would run it with piped input.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_rate_cli::{app, cli::Command, config::AppConfig};
use tax_rate_core::TaxRateRepository;

fn run_session(script: &str) -> (String, tax_rate_core::InMemoryTaxRateStore) {
    let config = AppConfig::default();
    let mut store = app::build_store(&config, true);
    let mut out = Vec::new();

    app::run_command(
        Command::Shell,
        &mut store,
        &config,
        Cursor::new(script.to_string()),
        &mut out,
    )
    .unwrap();

    (String::from_utf8(out).unwrap(), store)
}

#[test]
fn create_calculate_update_recalculate() {
    let (out, store) = run_session(
        "add \"CA Sales Tax\" 7.25\n\
         calc 200\n",
    );
    let id = store.list_all()[0].id.clone();

    assert!(out.contains("Rate:   CA Sales Tax (7.25%) [auto-selected]\n"));
    assert!(out.contains("Tax:    $14.50\n"));
    assert!(out.contains("Total:  $214.50\n"));

    let config = AppConfig::default();
    let mut store = store;
    let mut out = Vec::new();
    app::run_command(
        Command::Shell,
        &mut store,
        &config,
        Cursor::new(format!("update {id} --rate 0.08\ncalc 200 {id}\n")),
        &mut out,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Tax:    $16.00\n"));
    assert!(out.contains("Total:  $216.00\n"));
    assert_eq!(store.get_by_id(&id).unwrap().rate, dec!(0.08));
}

#[test]
fn delete_leaves_store_empty() {
    let (out, store) = run_session("add Temp 5\nlist\n");
    let id = store.list_all()[0].id.clone();
    assert!(out.contains("Temp"));

    let config = AppConfig::default();
    let mut store = store;
    let mut out = Vec::new();
    app::run_command(
        Command::Shell,
        &mut store,
        &config,
        Cursor::new(format!("delete {id} --yes\nlist\ncalc 10\n")),
        &mut out,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Deleted 'Temp'.\n\
         No tax rates configured.\n\
         error: no tax rates available for automatic selection\n"
    );
    assert!(store.list_all().is_empty());
}

#[test]
fn errors_do_not_end_the_session() {
    let (out, store) = run_session("add \"\" -1\nadd Valid 3\nquit\nadd Ignored 4\n");

    assert!(out.contains("error: Name is required; Rate must be positive\n"));
    assert_eq!(store.list_all().len(), 1);
    assert_eq!(store.list_all()[0].name, "Valid");
}
