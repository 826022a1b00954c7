//! Tax calculation and rate selection.
//!
//! [`TaxCalculator`] applies a stored rate to a base amount; [`common`]
//! holds the rounding helpers used when results are displayed.

pub mod calculator;
pub mod common;

pub use calculator::{Calculation, CalculationError, RateSelection, TaxBreakdown, TaxCalculator};
