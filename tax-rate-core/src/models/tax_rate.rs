use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, normalize_rate, validate_name, validate_rate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    /// Fraction of the base amount, e.g. `0.0825` for 8.25%.
    pub rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaxRate {
    /// Merge the supplied fields into this record and stamp `updated_at`.
    ///
    /// Only `name` and `rate` can change; a `None` field leaves the current
    /// value untouched.
    pub fn apply_update(
        &mut self,
        update: TaxRateUpdate,
        at: DateTime<Utc>,
    ) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(rate) = update.rate {
            self.rate = normalize_rate(rate);
        }
        self.updated_at = at;
    }
}

/// For creating new rates (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateFormData {
    pub name: String,
    pub rate: Decimal,
}

impl TaxRateFormData {
    pub fn new(
        name: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// Returns the same data with a percentage rate (`> 1`) converted to a
    /// fraction.
    pub fn normalized(self) -> Self {
        Self {
            rate: normalize_rate(self.rate),
            ..self
        }
    }

    /// Validates the form the way the entry dialog does before submitting.
    ///
    /// Rules:
    /// - name must not be blank
    /// - rate, after percentage normalization, must lie in `[0, 1]`
    ///
    /// Call this on the rate as entered, before [`Self::normalized`]: a
    /// normalized `1.5` would be read as 1.5% and pass.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = [
            validate_name(&self.name).err(),
            validate_rate(normalize_rate(self.rate)).err(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Partial form data for [`TaxRate`] updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateUpdate {
    pub name: Option<String>,
    pub rate: Option<Decimal>,
}

impl TaxRateUpdate {
    pub fn with_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rate(
        mut self,
        rate: Decimal,
    ) -> Self {
        self.rate = Some(rate);
        self
    }

    /// `true` when neither field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.rate.is_none()
    }

    /// Same rules as [`TaxRateFormData::validate`], applied only to the
    /// fields that are present.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = [
            self.name.as_deref().and_then(|n| validate_name(n).err()),
            self.rate.and_then(|r| validate_rate(normalize_rate(r)).err()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<TaxRateFormData> for TaxRateUpdate {
    fn from(data: TaxRateFormData) -> Self {
        Self {
            name: Some(data.name),
            rate: Some(data.rate),
        }
    }
}
