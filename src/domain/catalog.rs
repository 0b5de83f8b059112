//! Catalog reference records.
//!
//! Semesters, academic faculties, departments, courses and faculty members
//! are owned by other parts of the system. These records carry only the
//! fields the scheduling core validates against.

use serde::{Deserialize, Serialize};

use super::foundation::{AcademicFacultyId, CourseId, DepartmentId, FacultyId, SemesterId};

/// An academic semester that a registration period can be opened for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: SemesterId,
    pub name: String,
    pub year: i32,
}

/// An academic faculty (organisational unit grouping departments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicFaculty {
    pub id: AcademicFacultyId,
    pub name: String,
}

/// A department and the academic faculty it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub academic_faculty: AcademicFacultyId,
}

impl Department {
    /// Returns true if this department is part of the given academic faculty.
    pub fn belongs_to(&self, academic_faculty: &AcademicFacultyId) -> bool {
        &self.academic_faculty == academic_faculty
    }
}

/// A catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub code: String,
}

/// A faculty member who can be assigned to teach offerings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
}
