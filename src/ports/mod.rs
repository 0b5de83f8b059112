//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReferenceReader` / `Catalog` - Read-only catalog lookups
//! - `SchedulingStore` / `SchedulingTransaction` - Registration and offering
//!   persistence with scoped, all-or-nothing transactions

mod reference_reader;
mod scheduling_store;

pub use reference_reader::{Catalog, ReferenceReader};
pub use scheduling_store::{SchedulingStore, SchedulingTransaction};
