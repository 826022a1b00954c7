use crate::models::{AutoSelectionSettings, TaxRate, TaxRateFormData, TaxRateUpdate};

/// CRUD access to the canonical set of tax rates.
///
/// Absence is reported through `Option`/`bool` results rather than errors:
/// an unknown id is an ordinary outcome for every lookup and mutation here.
/// Mutations take `&mut self`, so a store is owned by exactly one caller at a
/// time and every change is visible to the next call.
pub trait TaxRateRepository {
    /// Snapshot of every rate, in insertion order.
    fn list_all(&self) -> Vec<TaxRate>;

    /// Rates offered for selection. Every stored rate is active.
    fn list_active(&self) -> Vec<TaxRate> {
        self.list_all()
    }

    fn get_by_id(
        &self,
        id: &str,
    ) -> Option<TaxRate>;

    /// Store a new rate under a freshly generated id, stamping both
    /// timestamps with the current time.
    fn create(
        &mut self,
        data: TaxRateFormData,
    ) -> TaxRate;

    /// Merge `data` into the rate with the given id and refresh its
    /// `updated_at`. Returns `None` without touching the store when the id is
    /// unknown.
    fn update(
        &mut self,
        id: &str,
        data: TaxRateUpdate,
    ) -> Option<TaxRate>;

    /// Remove the rate with the given id. Returns whether anything was
    /// removed.
    fn delete(
        &mut self,
        id: &str,
    ) -> bool;

    fn auto_selection_settings(&self) -> AutoSelectionSettings;

    fn update_auto_selection_settings(
        &mut self,
        settings: AutoSelectionSettings,
    );
}
