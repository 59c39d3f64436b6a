//! In-memory repository adapters.

mod cycle_repository;
mod pdi_repository;

pub use cycle_repository::InMemoryCycleRepository;
pub use pdi_repository::InMemoryPdiRepository;
