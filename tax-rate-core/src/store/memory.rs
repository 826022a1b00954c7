use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::repository::TaxRateRepository;
use crate::models::{AutoSelectionSettings, TaxRate, TaxRateFormData, TaxRateUpdate};

/// Source of the timestamps stamped on created and updated rates.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Creation/update time of the built-in rates: 2024-01-01T00:00:00Z.
const SEED_TIMESTAMP_SECS: i64 = 1_704_067_200;

/// The rates a fresh installation starts with.
fn seed_rates() -> Vec<TaxRate> {
    let at = DateTime::from_timestamp(SEED_TIMESTAMP_SECS, 0).unwrap_or_default();
    [
        ("1", "California Sales Tax", Decimal::new(725, 4)),
        ("2", "New York Income Tax", Decimal::new(4, 2)),
        ("3", "Texas Property Tax", Decimal::new(183, 4)),
    ]
    .into_iter()
    .map(|(id, name, rate)| TaxRate {
        id: id.to_string(),
        name: name.to_string(),
        rate,
        created_at: at,
        updated_at: at,
    })
    .collect()
}

/// Process-memory [`TaxRateRepository`].
///
/// Rates live in a `Vec` so listing order is insertion order. Nothing is
/// persisted; dropping the store drops the data.
pub struct InMemoryTaxRateStore {
    rates: Vec<TaxRate>,
    auto_selection: AutoSelectionSettings,
    clock: Clock,
}

impl InMemoryTaxRateStore {
    /// Create an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(Utc::now))
    }

    /// Create a store pre-populated with the built-in rates.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.seed_defaults();
        store
    }

    /// Create an empty store that reads time from `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            rates: Vec::new(),
            auto_selection: AutoSelectionSettings::default(),
            clock,
        }
    }

    /// Append the built-in rates, skipping any whose id is already taken.
    pub fn seed_defaults(&mut self) {
        for rate in seed_rates() {
            if self.position(&rate.id).is_none() {
                debug!(id = %rate.id, name = %rate.name, "seeding tax rate");
                self.rates.push(rate);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn position(
        &self,
        id: &str,
    ) -> Option<usize> {
        self.rates.iter().position(|rate| rate.id == id)
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

impl Default for InMemoryTaxRateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryTaxRateStore {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("InMemoryTaxRateStore")
            .field("rates", &self.rates)
            .field("auto_selection", &self.auto_selection)
            .finish_non_exhaustive()
    }
}

impl TaxRateRepository for InMemoryTaxRateStore {
    fn list_all(&self) -> Vec<TaxRate> {
        self.rates.clone()
    }

    fn get_by_id(
        &self,
        id: &str,
    ) -> Option<TaxRate> {
        let found = self.rates.iter().find(|rate| rate.id == id).cloned();
        if found.is_none() {
            debug!(id, "tax rate not found");
        }
        found
    }

    fn create(
        &mut self,
        data: TaxRateFormData,
    ) -> TaxRate {
        let data = data.normalized();
        let now = (self.clock)();
        let rate = TaxRate {
            id: self.generate_id(),
            name: data.name,
            rate: data.rate,
            created_at: now,
            updated_at: now,
        };

        info!(id = %rate.id, name = %rate.name, rate = %rate.rate, "created tax rate");
        self.rates.push(rate.clone());
        rate
    }

    fn update(
        &mut self,
        id: &str,
        data: TaxRateUpdate,
    ) -> Option<TaxRate> {
        let Some(index) = self.position(id) else {
            warn!(id, "update skipped: tax rate not found");
            return None;
        };

        let now = (self.clock)();
        let rate = &mut self.rates[index];
        rate.apply_update(data, now);

        info!(id, name = %rate.name, rate = %rate.rate, "updated tax rate");
        Some(rate.clone())
    }

    fn delete(
        &mut self,
        id: &str,
    ) -> bool {
        match self.position(id) {
            Some(index) => {
                let removed = self.rates.remove(index);
                info!(id, name = %removed.name, "deleted tax rate");
                true
            }
            None => {
                warn!(id, "delete skipped: tax rate not found");
                false
            }
        }
    }

    fn auto_selection_settings(&self) -> AutoSelectionSettings {
        self.auto_selection.clone()
    }

    fn update_auto_selection_settings(
        &mut self,
        settings: AutoSelectionSettings,
    ) {
        info!(enabled = settings.enabled, "updated auto-selection settings");
        self.auto_selection = settings;
    }
}
