//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the scheduling domain.

mod errors;
mod ids;
mod registration_status;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AcademicFacultyId, CourseId, DepartmentId, FacultyId, OfferingId, RegistrationId, SemesterId,
};
pub use registration_status::RegistrationStatus;
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;
