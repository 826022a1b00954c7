//! CSV loader for tax rates.
//!
//! ## CSV Format
//!
//! A header row is required. Column order does **not** matter (headers are
//! matched by name) and whitespace around values is ignored.
//!
//! | Column | Required | Notes |
//! |--------|----------|---------------------------------------------------|
//! | `name` | yes      | Non-empty display name |
//! | `rate` | yes      | `7.25`, `7.25%` or `0.0725` all mean 7.25 percent |
//!
//! ```csv
//! name,rate
//! CA Sales Tax,7.25
//! Seattle Sales Tax,0.1025
//! ```
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tax_rate_core::{TaxRate, TaxRateFormData, TaxRateRepository, ValidationError};
use tracing::info;

use crate::utils::{ParseDecimalError, parse_rate};

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    rate: String,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `rate` cell is not a number. `row` is 1-based (header = row 0).
    #[error("invalid rate on row {row}: {source}")]
    InvalidRate {
        row: usize,
        #[source]
        source: ParseDecimalError,
    },

    /// The row parsed but fails form validation.
    #[error("row {row}: {}", join_errors(.errors))]
    Invalid {
        row: usize,
        errors: Vec<ValidationError>,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convert a single CSV row into normalized form data.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<TaxRateFormData, CsvLoadError> {
    let rate = parse_rate(&row.rate).map_err(|source| CsvLoadError::InvalidRate {
        row: row_number,
        source,
    })?;
    let data = TaxRateFormData::new(row.name, rate);
    data.validate().map_err(|errors| CsvLoadError::Invalid {
        row: row_number,
        errors,
    })?;
    Ok(data.normalized())
}

/// Parse CSV text and return validated form data in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] – the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidRate`] – a rate cell is not a number.
/// * [`CsvLoadError::Invalid`] – a row fails validation.
pub fn load_from_str(input: &str) -> Result<Vec<TaxRateFormData>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> anyhow::Result<Vec<TaxRateFormData>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let rates = load_from_str(&contents)
        .with_context(|| format!("Failed to parse CSV '{}'", path.display()))?;
    Ok(rates)
}

/// Create every record in `rates`, in order, and return what was stored.
pub fn import_into<R: TaxRateRepository + ?Sized>(
    repo: &mut R,
    rates: Vec<TaxRateFormData>,
) -> Vec<TaxRate> {
    let created: Vec<_> = rates.into_iter().map(|data| repo.create(data)).collect();
    info!(count = created.len(), "imported tax rates");
    created
}
