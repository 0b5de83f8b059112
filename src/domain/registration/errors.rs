//! Registration-specific error types.

use std::fmt;

use crate::domain::foundation::{
    DomainError, ErrorCode, InvalidTransition, RegistrationId, RegistrationStatus, SemesterId,
    ValidationError,
};

/// Step of the cascade delete that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    /// Opening the transaction.
    Begin,
    /// Deleting the offerings that reference the registration.
    Offerings,
    /// Deleting the registration itself.
    Registration,
    /// Committing the transaction.
    Commit,
}

impl fmt::Display for CascadeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CascadeStage::Begin => "begin",
            CascadeStage::Offerings => "offerings",
            CascadeStage::Registration => "registration",
            CascadeStage::Commit => "commit",
        };
        write!(f, "{}", s)
    }
}

/// Registration-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Registration was not found.
    NotFound(RegistrationId),
    /// Target semester does not exist in the catalog.
    SemesterNotFound(SemesterId),
    /// Another registration is still UPCOMING or ONGOING.
    ActiveRegistrationExists {
        existing: RegistrationId,
        status: RegistrationStatus,
    },
    /// The semester already has a registration of some status.
    SemesterAlreadyRegistered(SemesterId),
    /// Requested status change does not follow an allowed edge.
    IllegalTransition(InvalidTransition<RegistrationStatus>),
    /// Non-status fields cannot change once the registration left UPCOMING.
    ImmutableState(RegistrationStatus),
    /// The atomic cascade delete was rolled back.
    CascadeDeleteFailed { stage: CascadeStage, reason: String },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Persistence failure, or a storage constraint guarding one of the
    /// invariants above.
    Infrastructure { code: ErrorCode, message: String },
}

impl RegistrationError {
    pub fn not_found(id: RegistrationId) -> Self {
        RegistrationError::NotFound(id)
    }
    pub fn semester_not_found(id: SemesterId) -> Self {
        RegistrationError::SemesterNotFound(id)
    }
    pub fn active_exists(existing: RegistrationId, status: RegistrationStatus) -> Self {
        RegistrationError::ActiveRegistrationExists { existing, status }
    }
    pub fn semester_already_registered(id: SemesterId) -> Self {
        RegistrationError::SemesterAlreadyRegistered(id)
    }
    pub fn immutable(status: RegistrationStatus) -> Self {
        RegistrationError::ImmutableState(status)
    }
    pub fn cascade_failed(stage: CascadeStage, reason: impl Into<String>) -> Self {
        RegistrationError::CascadeDeleteFailed {
            stage,
            reason: reason.into(),
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RegistrationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        RegistrationError::Infrastructure {
            code: ErrorCode::DatabaseError,
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::NotFound(_) => ErrorCode::NotFound,
            RegistrationError::SemesterNotFound(_) => ErrorCode::NotFound,
            RegistrationError::ActiveRegistrationExists { .. } => {
                ErrorCode::ActiveRegistrationExists
            }
            RegistrationError::SemesterAlreadyRegistered(_) => ErrorCode::ActiveRegistrationExists,
            RegistrationError::IllegalTransition(_) => ErrorCode::IllegalTransition,
            RegistrationError::ImmutableState(_) => ErrorCode::ImmutableState,
            RegistrationError::CascadeDeleteFailed { .. } => ErrorCode::CascadeDeleteFailed,
            RegistrationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RegistrationError::Infrastructure { code, .. } => *code,
        }
    }
    pub fn message(&self) -> String {
        match self {
            RegistrationError::NotFound(id) => format!("Semester registration not found: {}", id),
            RegistrationError::SemesterNotFound(id) => format!("Semester not found: {}", id),
            RegistrationError::ActiveRegistrationExists { existing, status } => format!(
                "There is already an {} registered semester ({})",
                status, existing
            ),
            RegistrationError::SemesterAlreadyRegistered(id) => {
                format!("Semester {} is already registered", id)
            }
            RegistrationError::IllegalTransition(t) => {
                format!("Illegal status transition from {} to {}", t.from, t.to)
            }
            RegistrationError::ImmutableState(status) => {
                format!("Semester registration is {} and can no longer be modified", status)
            }
            RegistrationError::CascadeDeleteFailed { stage, reason } => {
                format!("Cascade delete failed at {} stage: {}", stage, reason)
            }
            RegistrationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RegistrationError::Infrastructure { message, .. } => format!("Error: {}", message),
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

impl From<InvalidTransition<RegistrationStatus>> for RegistrationError {
    fn from(err: InvalidTransition<RegistrationStatus>) -> Self {
        RegistrationError::IllegalTransition(err)
    }
}

impl From<ValidationError> for RegistrationError {
    fn from(err: ValidationError) -> Self {
        RegistrationError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        RegistrationError::Infrastructure {
            code: err.code,
            message: err.message,
        }
    }
}
