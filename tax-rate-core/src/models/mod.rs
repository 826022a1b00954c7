mod auto_selection;
mod tax_rate;
mod validation;

pub use auto_selection::{AutoSelectionSettings, SelectionCriteria};
pub use tax_rate::{TaxRate, TaxRateFormData, TaxRateUpdate};
pub use validation::{ValidationError, normalize_rate, validate_rate};
