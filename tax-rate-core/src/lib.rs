pub mod calculations;
pub mod models;
pub mod store;

pub use calculations::{Calculation, CalculationError, RateSelection, TaxBreakdown, TaxCalculator};
pub use models::*;
pub use store::{Clock, InMemoryTaxRateStore, TaxRateRepository};
