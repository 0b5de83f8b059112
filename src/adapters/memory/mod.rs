//! In-memory adapters for tests and local development.
//!
//! - `InMemorySchedulingStore` - Transactional registration/offering store
//!   with failure injection
//! - `InMemoryCatalog` - Builder for fixed catalog readers

mod catalog;
mod scheduling_store;

pub use catalog::{InMemoryCatalog, InMemoryReferenceReader};
pub use scheduling_store::{FailPoint, InMemorySchedulingStore};
