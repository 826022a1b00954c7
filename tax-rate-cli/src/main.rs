use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tax_rate_cli::cli::{Cli, Command};
use tax_rate_cli::config::AppConfig;
use tax_rate_cli::shell::Shell;
use tax_rate_cli::{app, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref());
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(?config, "configuration resolved");

    let mut store = app::build_store(&config, cli.no_defaults);
    if let Some(path) = &cli.import {
        let count = app::import_rates(&mut store, path)
            .with_context(|| format!("Failed to import '{}'", path.display()))?;
        info!("imported {count} tax rates from {}", path.display());
    }

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match cli.command.unwrap_or_default() {
        Command::Shell if io::stdin().is_terminal() => {
            Shell::new(&mut store, &config.currency_symbol)
                .with_prompt("tax-rates> ")
                .run(stdin, stdout)?;
        }
        command => app::run_command(command, &mut store, &config, stdin, stdout)?,
    }

    Ok(())
}
