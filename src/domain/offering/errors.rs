//! Offering-specific error types.

use std::fmt;

use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, DomainError, ErrorCode, FacultyId,
    RegistrationStatus, ValidationError,
};

use super::Section;

/// Kind of record an offering refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Offering,
    Registration,
    AcademicFaculty,
    Department,
    Course,
    Faculty,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reference::Offering => "Offered course",
            Reference::Registration => "Semester registration",
            Reference::AcademicFaculty => "Academic faculty",
            Reference::Department => "Department",
            Reference::Course => "Course",
            Reference::Faculty => "Faculty",
        };
        write!(f, "{}", s)
    }
}

/// Offering-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferingError {
    /// A referenced record does not exist.
    NotFound { reference: Reference, id: String },
    /// The department does not belong to the stated academic faculty.
    IntegrityMismatch {
        department: DepartmentId,
        academic_faculty: AcademicFacultyId,
    },
    /// Same registration, course and section already offered.
    DuplicateSection { course: CourseId, section: Section },
    /// The faculty member already teaches at an overlapping time.
    ScheduleConflict { faculty: FacultyId },
    /// The owning registration is no longer `UPCOMING`.
    ImmutableState(RegistrationStatus),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Persistence failure, or a storage constraint guarding one of the
    /// invariants above.
    Infrastructure { code: ErrorCode, message: String },
}

impl OfferingError {
    pub fn not_found(reference: Reference, id: impl fmt::Display) -> Self {
        OfferingError::NotFound {
            reference,
            id: id.to_string(),
        }
    }
    pub fn integrity_mismatch(department: DepartmentId, academic_faculty: AcademicFacultyId) -> Self {
        OfferingError::IntegrityMismatch {
            department,
            academic_faculty,
        }
    }
    pub fn duplicate_section(course: CourseId, section: Section) -> Self {
        OfferingError::DuplicateSection { course, section }
    }
    pub fn schedule_conflict(faculty: FacultyId) -> Self {
        OfferingError::ScheduleConflict { faculty }
    }
    pub fn immutable(status: RegistrationStatus) -> Self {
        OfferingError::ImmutableState(status)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OfferingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        OfferingError::Infrastructure {
            code: ErrorCode::DatabaseError,
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            OfferingError::NotFound { .. } => ErrorCode::NotFound,
            OfferingError::IntegrityMismatch { .. } => ErrorCode::IntegrityMismatch,
            OfferingError::DuplicateSection { .. } => ErrorCode::DuplicateSection,
            OfferingError::ScheduleConflict { .. } => ErrorCode::ScheduleConflict,
            OfferingError::ImmutableState(_) => ErrorCode::ImmutableState,
            OfferingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            OfferingError::Infrastructure { code, .. } => *code,
        }
    }
    pub fn message(&self) -> String {
        match self {
            OfferingError::NotFound { reference, id } => format!("{} not found: {}", reference, id),
            OfferingError::IntegrityMismatch {
                department,
                academic_faculty,
            } => format!(
                "Department {} does not belong to academic faculty {}",
                department, academic_faculty
            ),
            OfferingError::DuplicateSection { course, section } => format!(
                "Course {} already has section '{}' in this registration",
                course, section
            ),
            OfferingError::ScheduleConflict { faculty } => format!(
                "Faculty {} is not available at that time; choose other days or times",
                faculty
            ),
            OfferingError::ImmutableState(status) => format!(
                "Offered course cannot be changed while its registration is {}",
                status
            ),
            OfferingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            OfferingError::Infrastructure { message, .. } => format!("Error: {}", message),
        }
    }
}

impl fmt::Display for OfferingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OfferingError {}

impl From<ValidationError> for OfferingError {
    fn from(err: ValidationError) -> Self {
        OfferingError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for OfferingError {
    fn from(err: DomainError) -> Self {
        OfferingError::Infrastructure {
            code: err.code,
            message: err.message,
        }
    }
}
