//! PostgreSQL adapters - Database implementations for the scheduling ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSchedulingStore` - SERIALIZABLE transactions over
//!   registrations and offered courses
//! - `PostgresCatalogReader` - Catalog reference lookups

mod catalog_reader;
mod rows;
mod scheduling_store;

pub use catalog_reader::PostgresCatalogReader;
pub use scheduling_store::{PostgresSchedulingStore, PostgresTransaction};
