//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store and catalog (tests, local development)
//! - `postgres` - PostgreSQL store and catalog

pub mod memory;
pub mod postgres;

pub use memory::{FailPoint, InMemoryCatalog, InMemoryReferenceReader, InMemorySchedulingStore};
pub use postgres::{PostgresCatalogReader, PostgresSchedulingStore};
