//! Tax breakdown for a base amount against a stored rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_rate_core::{
//!     InMemoryTaxRateStore, RateSelection, TaxCalculator, TaxRateFormData, TaxRateRepository,
//! };
//!
//! let mut store = InMemoryTaxRateStore::new();
//! let ca = store.create(TaxRateFormData::new("CA Sales Tax", dec!(0.0725)));
//!
//! let breakdown = TaxCalculator::compute(dec!(200), &ca).unwrap();
//! assert_eq!(breakdown.tax_amount, dec!(14.5));
//! assert_eq!(breakdown.total_amount, dec!(214.5));
//!
//! let calc = TaxCalculator::calculate(&store, dec!(200), &RateSelection::Auto).unwrap();
//! assert!(calc.auto_selected);
//! assert_eq!(calc.applied_rate.id, ca.id);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::TaxRate;
use crate::store::TaxRateRepository;

/// Errors that can occur when resolving the rate for a calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// Automatic selection was requested but the store holds no rates.
    #[error("no tax rates available for automatic selection")]
    NoRatesAvailable,

    /// A manually selected rate id does not exist.
    #[error("tax rate '{0}' not found")]
    RateNotFound(String),

    /// The tax or total does not fit in a `Decimal`.
    #[error("amount too large to calculate tax on")]
    Overflow,
}

/// Tax owed on a base amount and the resulting total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Which rate the user asked the calculator to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSelection {
    #[default]
    Auto,
    Manual(String),
}

impl From<&str> for RateSelection {
    /// `"auto"` (any case) selects automatically; anything else is a rate id.
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Manual(value.trim().to_string())
        }
    }
}

/// Full result of a calculation, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    pub base_amount: Decimal,
    pub breakdown: TaxBreakdown,
    pub applied_rate: TaxRate,
    pub auto_selected: bool,
}

pub struct TaxCalculator;

impl TaxCalculator {
    /// `tax = base * rate`, `total = base + tax`.
    ///
    /// No rounding and no validation: zero and negative bases are computed
    /// as given, and the rate is assumed to already be a fraction.
    ///
    /// # Errors
    /// [`CalculationError::Overflow`] when either result exceeds the
    /// `Decimal` range.
    pub fn compute(
        base_amount: Decimal,
        rate: &TaxRate,
    ) -> Result<TaxBreakdown, CalculationError> {
        let tax_amount = base_amount
            .checked_mul(rate.rate)
            .ok_or(CalculationError::Overflow)?;
        let total_amount = base_amount
            .checked_add(tax_amount)
            .ok_or(CalculationError::Overflow)?;
        Ok(TaxBreakdown {
            tax_amount,
            total_amount,
        })
    }

    /// Picks the first rate in listing order, or `None` for an empty store.
    ///
    /// This is a placeholder for a jurisdiction-based lookup. The store's
    /// [`AutoSelectionSettings`](crate::AutoSelectionSettings) are not
    /// consulted.
    pub fn auto_select<R: TaxRateRepository + ?Sized>(repo: &R) -> Option<TaxRate> {
        repo.list_all().into_iter().next()
    }

    /// Auto-selection for an invoice's region and tax type.
    ///
    /// Both hints are currently ignored and the result is identical to
    /// [`TaxCalculator::auto_select`].
    pub fn auto_select_for<R: TaxRateRepository + ?Sized>(
        repo: &R,
        region: Option<&str>,
        category: Option<&str>,
    ) -> Option<TaxRate> {
        debug!(?region, ?category, "auto-select hints ignored");
        Self::auto_select(repo)
    }

    /// Resolves `selection` against the store and computes the breakdown.
    ///
    /// # Errors
    /// * [`CalculationError::NoRatesAvailable`] when auto-selecting from an
    ///   empty store.
    /// * [`CalculationError::RateNotFound`] when a manual id is unknown.
    /// * [`CalculationError::Overflow`] when the amount is too large.
    pub fn calculate<R: TaxRateRepository + ?Sized>(
        repo: &R,
        base_amount: Decimal,
        selection: &RateSelection,
    ) -> Result<Calculation, CalculationError> {
        let (applied_rate, auto_selected) = match selection {
            RateSelection::Auto => (
                Self::auto_select(repo).ok_or(CalculationError::NoRatesAvailable)?,
                true,
            ),
            RateSelection::Manual(id) => (
                repo.get_by_id(id)
                    .ok_or_else(|| CalculationError::RateNotFound(id.clone()))?,
                false,
            ),
        };

        let breakdown = Self::compute(base_amount, &applied_rate)?;
        debug!(
            rate_id = %applied_rate.id,
            %base_amount,
            tax = %breakdown.tax_amount,
            total = %breakdown.total_amount,
            auto_selected,
            "computed tax"
        );

        Ok(Calculation {
            base_amount,
            breakdown,
            applied_rate,
            auto_selected,
        })
    }
}
