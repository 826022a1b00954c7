pub mod memory;
pub mod repository;

pub use memory::{Clock, InMemoryTaxRateStore};
pub use repository::TaxRateRepository;
