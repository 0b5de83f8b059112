//! Registration domain module.
//!
//! Semester registration lifecycle: creation in `UPCOMING`, forward-only
//! status changes, and the rules deciding when the registration and its
//! offerings may still be modified or deleted.

mod aggregate;
mod errors;

pub use aggregate::{
    RegistrationTerms, SemesterRegistration, TermsUpdate, DEFAULT_MAX_CREDIT, DEFAULT_MIN_CREDIT,
};
pub use errors::{CascadeStage, RegistrationError};
