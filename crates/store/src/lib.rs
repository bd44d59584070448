pub mod fixtures;
pub mod memory;

pub use fixtures::{fence_and_gate_job, fence_job, standard_catalog, SeedCatalog};
pub use memory::{InMemoryJobStore, InMemoryPricingConfigStore, InMemoryQuoteStore};
