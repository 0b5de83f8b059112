//! Read-only lookup port for catalog reference records.
//!
//! The scheduling core never writes semesters, faculties, departments,
//! courses or faculty members; it only needs to know whether they exist and,
//! for departments, which academic faculty they belong to. Each record type
//! gets its own narrow reader instead of a generic document store.
//!
//! # Example
//!
//! ```ignore
//! let department = catalog
//!     .departments
//!     .get(&cmd.department)
//!     .await?
//!     .ok_or_else(|| OfferingError::not_found(Reference::Department, cmd.department))?;
//! ```

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::catalog::{AcademicFaculty, Course, Department, Faculty, Semester};
use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, DomainError, FacultyId, SemesterId,
};

/// Lookup port for one kind of reference record.
///
/// # Type Parameters
///
/// - `T`: The record type
/// - `ID`: Its identifier type
///
/// # Default Implementation
///
/// `exists` delegates to `get`. Implementors may override this if a cheaper
/// check is available (e.g., `SELECT EXISTS`).
#[async_trait]
pub trait ReferenceReader<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Finds a record by its identifier.
    ///
    /// Returns `Ok(None)` if it doesn't exist; `Err` only for
    /// infrastructure failures.
    async fn get(&self, id: &ID) -> Result<Option<T>, DomainError>;

    /// Checks if a record with the given ID exists.
    async fn exists(&self, id: &ID) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}

/// The set of catalog readers the handlers validate against.
#[derive(Clone)]
pub struct Catalog {
    pub semesters: Arc<dyn ReferenceReader<Semester, SemesterId>>,
    pub academic_faculties: Arc<dyn ReferenceReader<AcademicFaculty, AcademicFacultyId>>,
    pub departments: Arc<dyn ReferenceReader<Department, DepartmentId>>,
    pub courses: Arc<dyn ReferenceReader<Course, CourseId>>,
    pub faculties: Arc<dyn ReferenceReader<Faculty, FacultyId>>,
}
