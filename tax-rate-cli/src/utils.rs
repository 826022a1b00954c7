use std::fmt::Display;

use rust_decimal::Decimal;
use tax_rate_core::calculations::common::{rate_as_percent, round_half_up};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned by [`split_args`] when a double quote is never closed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unterminated quote in '{0}'")]
pub struct UnterminatedQuote(pub String);

/// Normalizes input for decimal parsing: trims whitespace, a leading `$`,
/// and commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim()
        .replace(',', "")
}

fn parse_normalized(s: &str) -> Result<Decimal, ParseDecimalError> {
    normalize_decimal_input(s).parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a monetary amount such as `"1,234.56"` or `"$200"`.
///
/// Empty or whitespace-only input is treated as 0, matching the calculator's
/// amount field.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    if normalize_decimal_input(s).is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_normalized(s)
}

/// Parses a rate as typed by a user, in the form the store accepts.
///
/// Without a `%` the number is returned as entered; values above 1 become
/// fractions later through [`tax_rate_core::normalize_rate`]. A trailing `%`
/// always means percent, so the result is chosen such that
/// `normalize_rate` yields exactly `p / 100` (`"150%"` stays out of range,
/// `"1%"` is `0.01`). Empty input is an error.
pub fn parse_rate(s: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = s.trim();
    match trimmed.strip_suffix('%') {
        Some(percent) => parse_normalized(percent).map(percent_as_entered),
        None => parse_normalized(trimmed),
    }
}

/// Percentages above 1 are already what `normalize_rate` divides by 100;
/// smaller ones would be read as fractions, so they are divided here.
fn percent_as_entered(percent: Decimal) -> Decimal {
    if percent > Decimal::ONE {
        percent
    } else {
        percent / Decimal::ONE_HUNDRED
    }
}

/// Formats an amount for display: rounded half-up to cents, grouped by
/// thousands, prefixed with `symbol` (`-$1,234.50`).
pub fn format_currency(
    amount: Decimal,
    symbol: &str,
) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a fractional rate as a percentage, e.g. `0.0825` → `"8.25%"`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate_as_percent(rate))
}

/// Formats an optional value for display, using "—" when `None`.
pub fn opt_display<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Splits a shell line into arguments on whitespace. Text inside double
/// quotes is kept together (`add "CA Sales Tax" 7.25`).
pub fn split_args(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(UnterminatedQuote(line.to_string()));
    }
    if in_token {
        args.push(current);
    }
    Ok(args)
}
