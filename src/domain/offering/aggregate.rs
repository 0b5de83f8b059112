//! OfferedCourse aggregate.
//!
//! One section of a course, taught by one faculty member, during one
//! registration period, on a weekly recurring time slot.
//!
//! # Identity
//!
//! - `(registration, course, section)` is unique
//! - `(registration, faculty)` scopes schedule conflicts

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, FacultyId, OfferingId, RegistrationId, SemesterId,
    Timestamp, ValidationError,
};
use crate::domain::schedule::TimeSlot;

/// Maximum length for a section label.
pub const MAX_SECTION_LENGTH: usize = 32;

/// Section label of an offering, e.g. `"1"` or `"B"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Section(String);

impl Section {
    /// Creates a section label, trimming surrounding whitespace.
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(ValidationError::empty_field("section"));
        }
        if label.len() > MAX_SECTION_LENGTH {
            return Err(ValidationError::out_of_range(
                "section",
                1,
                MAX_SECTION_LENGTH as i32,
                label.len() as i32,
            ));
        }
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Section {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Section::new(value)
    }
}

impl From<Section> for String {
    fn from(section: Section) -> Self {
        section.0
    }
}

/// Where an offering sits in the catalog. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePlacement {
    pub academic_faculty: AcademicFacultyId,
    pub department: DepartmentId,
    pub course: CourseId,
}

/// Who teaches the offering, when, and for how many students.
///
/// These are the only fields an update may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    faculty: FacultyId,
    max_capacity: u32,
    slot: TimeSlot,
}

impl Assignment {
    /// # Errors
    ///
    /// - `OutOfRange` if `max_capacity` is zero
    pub fn new(faculty: FacultyId, max_capacity: u32, slot: TimeSlot) -> Result<Self, ValidationError> {
        if max_capacity == 0 {
            return Err(ValidationError::out_of_range(
                "max_capacity",
                1,
                i32::MAX,
                0,
            ));
        }
        Ok(Self {
            faculty,
            max_capacity,
            slot,
        })
    }

    pub fn faculty(&self) -> &FacultyId {
        &self.faculty
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }
}

/// Offered course aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferedCourse {
    id: OfferingId,
    registration: RegistrationId,
    semester: SemesterId,
    placement: CoursePlacement,
    section: Section,
    assignment: Assignment,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OfferedCourse {
    /// Creates a new offering. `semester` is copied from the registration.
    pub fn new(
        id: OfferingId,
        registration: RegistrationId,
        semester: SemesterId,
        placement: CoursePlacement,
        section: Section,
        assignment: Assignment,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            registration,
            semester,
            placement,
            section,
            assignment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute an offering from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: OfferingId,
        registration: RegistrationId,
        semester: SemesterId,
        placement: CoursePlacement,
        section: Section,
        assignment: Assignment,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            registration,
            semester,
            placement,
            section,
            assignment,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &OfferingId {
        &self.id
    }

    pub fn registration(&self) -> &RegistrationId {
        &self.registration
    }

    pub fn semester(&self) -> &SemesterId {
        &self.semester
    }

    pub fn placement(&self) -> &CoursePlacement {
        &self.placement
    }

    pub fn course(&self) -> &CourseId {
        &self.placement.course
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn faculty(&self) -> &FacultyId {
        self.assignment.faculty()
    }

    pub fn slot(&self) -> &TimeSlot {
        self.assignment.slot()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces faculty, capacity and schedule.
    ///
    /// Registration status and conflict checks are the caller's job; they
    /// need state outside this aggregate.
    pub fn reassign(&mut self, assignment: Assignment) -> Assignment {
        self.updated_at = Timestamp::now();
        std::mem::replace(&mut self.assignment, assignment)
    }
}
