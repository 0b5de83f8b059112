//! Offering domain module.
//!
//! Course sections offered within a registration period, each taught by one
//! faculty member on a weekly time slot.

mod aggregate;
mod errors;

pub use aggregate::{Assignment, CoursePlacement, OfferedCourse, Section, MAX_SECTION_LENGTH};
pub use errors::{OfferingError, Reference};
