//! In-memory catalog readers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::domain::catalog::{AcademicFaculty, Course, Department, Faculty, Semester};
use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, DomainError, FacultyId, SemesterId,
};
use crate::ports::{Catalog, ReferenceReader};

/// Fixed set of reference records keyed by id.
#[derive(Debug, Clone)]
pub struct InMemoryReferenceReader<T, ID> {
    records: HashMap<ID, T>,
}

impl<T, ID: Eq + Hash> InMemoryReferenceReader<T, ID> {
    pub fn new(records: HashMap<ID, T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl<T, ID> ReferenceReader<T, ID> for InMemoryReferenceReader<T, ID>
where
    T: Clone + Send + Sync + 'static,
    ID: Eq + Hash + Send + Sync + Debug + 'static,
{
    async fn get(&self, id: &ID) -> Result<Option<T>, DomainError> {
        Ok(self.records.get(id).cloned())
    }
}

/// Builder for a [`Catalog`] backed by in-memory readers.
///
/// # Example
///
/// ```ignore
/// let catalog = InMemoryCatalog::new()
///     .with_semester(fall.clone())
///     .with_course(compilers.clone())
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    semesters: HashMap<SemesterId, Semester>,
    academic_faculties: HashMap<AcademicFacultyId, AcademicFaculty>,
    departments: HashMap<DepartmentId, Department>,
    courses: HashMap<CourseId, Course>,
    faculties: HashMap<FacultyId, Faculty>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semesters.insert(semester.id, semester);
        self
    }

    pub fn with_academic_faculty(mut self, academic_faculty: AcademicFaculty) -> Self {
        self.academic_faculties
            .insert(academic_faculty.id, academic_faculty);
        self
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.departments.insert(department.id, department);
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.insert(course.id, course);
        self
    }

    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculties.insert(faculty.id, faculty);
        self
    }

    /// Freezes the records into a set of readers.
    pub fn build(self) -> Catalog {
        Catalog {
            semesters: Arc::new(InMemoryReferenceReader::new(self.semesters)),
            academic_faculties: Arc::new(InMemoryReferenceReader::new(self.academic_faculties)),
            departments: Arc::new(InMemoryReferenceReader::new(self.departments)),
            courses: Arc::new(InMemoryReferenceReader::new(self.courses)),
            faculties: Arc::new(InMemoryReferenceReader::new(self.faculties)),
        }
    }
}
