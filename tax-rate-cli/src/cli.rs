//! Command-line and shell grammars.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage named tax rates and calculate tax on an amount.
///
/// Rates live in memory for the lifetime of the process. Start the
/// interactive shell (the default) to create, edit and delete them.
#[derive(Debug, Parser)]
#[command(name = "tax-rates", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "TAX_RATES_CONFIG")]
    pub config: Option<PathBuf>,

    /// CSV file of `name,rate` rows to load before running the command.
    #[arg(long)]
    pub import: Option<PathBuf>,

    /// Start with an empty store instead of the built-in rates.
    #[arg(long, default_value_t = false)]
    pub no_defaults: bool,

    /// Log filter, e.g. `debug` or `tax_rate_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Subcommand)]
pub enum Command {
    /// Print every configured rate.
    List,

    /// Calculate tax on an amount.
    Calc {
        /// Base amount, e.g. `200` or `1,250.00`.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// Rate id to apply. Auto-selects when omitted.
        #[arg(long)]
        rate_id: Option<String>,
    },

    /// Interactive session (default).
    #[default]
    Shell,
}

/// One line typed into the shell. The first word names the command.
#[derive(Debug, Parser)]
#[command(multicall = true, disable_help_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// List every rate.
    #[command(alias = "ls")]
    List,

    /// Add a rate: `add "CA Sales Tax" 7.25`.
    Add {
        name: String,
        /// Percentage (`7.25`, `7.25%`) or fraction (`0.0725`).
        #[arg(allow_negative_numbers = true)]
        rate: String,
    },

    /// Change a rate's name and/or value.
    #[command(alias = "edit")]
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<String>,
    },

    /// Delete a rate (asks for confirmation).
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Calculate tax: `calc 200` (auto) or `calc 200 <id>`.
    Calc {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Rate id, or `auto`.
        #[arg(default_value = "auto")]
        rate: String,
    },

    /// Show or change auto-selection settings.
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Change the log filter, e.g. `log debug`.
    Log { level: String },

    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SettingsAction {
    /// Replace individual auto-selection settings.
    Set {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        fallback_rate: Option<String>,
    },
}
