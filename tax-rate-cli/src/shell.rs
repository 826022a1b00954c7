//! Line-oriented interactive session over a tax rate store.
//!
//! Each line is split with [`split_args`] and parsed with the
//! [`ShellLine`] grammar. A failing command prints its error and the session
//! carries on; only I/O failures on the session's own streams end it early.

use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow, bail};
use clap::{Parser, error::ErrorKind};
use tax_rate_core::{
    RateSelection, TaxCalculator, TaxRateFormData, TaxRateRepository, TaxRateUpdate,
    ValidationError, normalize_rate, validate_rate,
};
use tracing::{debug, info, warn};

use crate::cli::{SettingsAction, ShellCommand, ShellLine};
use crate::logging;
use crate::utils::{format_rate, parse_decimal, parse_rate, split_args};
use crate::views::{CalculationSummary, RateTable, SettingsSummary};

/// What the session loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, R: TaxRateRepository + ?Sized> {
    repo: &'a mut R,
    currency: &'a str,
    prompt: String,
}

fn validation_failed(errors: &[ValidationError]) -> anyhow::Error {
    warn!(?errors, "rejected tax rate input");
    let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
    anyhow!(messages.join("; "))
}

impl<'a, R: TaxRateRepository + ?Sized> Shell<'a, R> {
    pub fn new(
        repo: &'a mut R,
        currency: &'a str,
    ) -> Self {
        Self {
            repo,
            currency,
            prompt: String::new(),
        }
    }

    /// Text written before every line is read. Empty by default.
    pub fn with_prompt(
        mut self,
        prompt: impl Into<String>,
    ) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<I: BufRead, O: Write>(
        &mut self,
        mut input: I,
        mut out: O,
    ) -> io::Result<()> {
        let mut line = String::new();
        loop {
            if !self.prompt.is_empty() {
                write!(out, "{}", self.prompt)?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let command = line.trim().to_string();
            if command.is_empty() {
                continue;
            }

            if self.execute(&command, &mut input, &mut out)? == Flow::Quit {
                break;
            }
        }
        out.flush()
    }

    /// Runs a single command line, writing its output (or its error) to
    /// `out`. `input` is only read when a command needs confirmation.
    pub fn execute<I: BufRead, O: Write>(
        &mut self,
        line: &str,
        input: &mut I,
        out: &mut O,
    ) -> io::Result<Flow> {
        let args = match split_args(line) {
            Ok(args) => args,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(&args) {
            Ok(parsed) => parsed.command,
            // Help output arrives as an error too; clap has already
            // rendered both kinds.
            Err(e) => {
                if e.kind() != ErrorKind::DisplayHelp {
                    debug!(kind = ?e.kind(), "rejected shell line");
                }
                write!(out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "shell command");

        match self.dispatch(command, input, out) {
            Ok(flow) => Ok(flow),
            Err(e) => match e.downcast::<io::Error>() {
                Ok(io_err) => Err(io_err),
                Err(e) => {
                    writeln!(out, "error: {e:#}")?;
                    Ok(Flow::Continue)
                }
            },
        }
    }

    fn dispatch<I: BufRead, O: Write>(
        &mut self,
        command: ShellCommand,
        input: &mut I,
        out: &mut O,
    ) -> anyhow::Result<Flow> {
        match command {
            ShellCommand::List => {
                write!(out, "{}", RateTable(&self.repo.list_all()))?;
            }
            ShellCommand::Add { name, rate } => self.add(&name, &rate, out)?,
            ShellCommand::Update { id, name, rate } => {
                self.update(&id, name, rate.as_deref(), out)?;
            }
            ShellCommand::Delete { id, yes } => self.delete(&id, yes, input, out)?,
            ShellCommand::Calc { amount, rate } => self.calc(&amount, &rate, out)?,
            ShellCommand::Settings { action: None } => {
                write!(out, "{}", SettingsSummary(&self.repo.auto_selection_settings()))?;
            }
            ShellCommand::Settings {
                action: Some(action),
            } => self.set_settings(action, out)?,
            ShellCommand::Log { level } => {
                logging::set_log_level(&level)?;
                writeln!(out, "Log level set to '{level}'.")?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add<O: Write>(
        &mut self,
        name: &str,
        rate: &str,
        out: &mut O,
    ) -> anyhow::Result<()> {
        let rate = parse_rate(rate)?;
        let data = TaxRateFormData::new(name.trim(), rate);
        data.validate().map_err(|e| validation_failed(&e))?;

        let created = self.repo.create(data.normalized());
        info!(id = %created.id, name = %created.name, "tax rate added from shell");
        writeln!(
            out,
            "Added '{}' ({}) with id {}.",
            created.name,
            format_rate(created.rate),
            created.id
        )?;
        Ok(())
    }

    fn update<O: Write>(
        &mut self,
        id: &str,
        name: Option<String>,
        rate: Option<&str>,
        out: &mut O,
    ) -> anyhow::Result<()> {
        let mut update = TaxRateUpdate::default();
        if let Some(name) = name {
            update = update.with_name(name.trim());
        }
        if let Some(rate) = rate {
            update = update.with_rate(parse_rate(rate)?);
        }
        if update.is_empty() {
            bail!("nothing to update; pass --name and/or --rate");
        }
        update.validate().map_err(|e| validation_failed(&e))?;

        let updated = self
            .repo
            .update(id, update)
            .ok_or_else(|| anyhow!("tax rate '{id}' not found"))?;
        writeln!(
            out,
            "Updated '{}' ({}).",
            updated.name,
            format_rate(updated.rate)
        )?;
        Ok(())
    }

    fn delete<I: BufRead, O: Write>(
        &mut self,
        id: &str,
        confirmed: bool,
        input: &mut I,
        out: &mut O,
    ) -> anyhow::Result<()> {
        let rate = self
            .repo
            .get_by_id(id)
            .ok_or_else(|| anyhow!("tax rate '{id}' not found"))?;

        if !confirmed {
            write!(out, "Delete '{}'? [y/N] ", rate.name)?;
            out.flush()?;
            let mut answer = String::new();
            input.read_line(&mut answer)?;
            if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
        }

        if self.repo.delete(id) {
            writeln!(out, "Deleted '{}'.", rate.name)?;
        }
        Ok(())
    }

    fn calc<O: Write>(
        &mut self,
        amount: &str,
        rate: &str,
        out: &mut O,
    ) -> anyhow::Result<()> {
        let base_amount = parse_decimal(amount)?;
        let calculation =
            TaxCalculator::calculate(&*self.repo, base_amount, &RateSelection::from(rate))?;
        write!(
            out,
            "{}",
            CalculationSummary {
                calculation: &calculation,
                currency: self.currency,
            }
        )?;
        Ok(())
    }

    fn set_settings<O: Write>(
        &mut self,
        action: SettingsAction,
        out: &mut O,
    ) -> anyhow::Result<()> {
        let SettingsAction::Set {
            enabled,
            region,
            category,
            fallback_rate,
        } = action;

        let mut settings = self.repo.auto_selection_settings();
        if let Some(enabled) = enabled {
            settings.enabled = enabled;
        }
        if let Some(region) = region {
            settings.criteria.region = Some(region);
        }
        if let Some(category) = category {
            settings.criteria.category = Some(category);
        }
        if let Some(fallback) = fallback_rate {
            let rate = normalize_rate(parse_rate(&fallback).context("invalid fallback rate")?);
            validate_rate(rate).context("invalid fallback rate")?;
            settings.criteria.fallback_rate = Some(rate);
        }

        self.repo.update_auto_selection_settings(settings.clone());
        write!(out, "{}", SettingsSummary(&settings))?;
        Ok(())
    }
}
