//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, status enum, errors, state machine)
//! - `schedule` - Weekly time slots, overlap predicate, conflict detection
//! - `catalog` - Read-only reference records the core validates against
//! - `registration` - Semester registration lifecycle
//! - `offering` - Offered course sections

pub mod catalog;
pub mod foundation;
pub mod offering;
pub mod registration;
pub mod schedule;
