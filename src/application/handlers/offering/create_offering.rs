//! CreateOfferingHandler - Command handler for offering a course section.

use std::sync::Arc;

use super::checks::{
    department_belongs, faculty_is_free, require, require_registration, section_is_free,
};
use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, FacultyId, OfferingId, RegistrationId,
};
use crate::domain::offering::{
    Assignment, CoursePlacement, OfferedCourse, OfferingError, Reference, Section,
};
use crate::domain::schedule::{TimeSlot, Weekday};
use crate::ports::{Catalog, SchedulingStore};

/// Command to offer a course section in a registration period.
///
/// Times are `HH:MM` strings.
#[derive(Debug, Clone)]
pub struct CreateOfferingCommand {
    pub registration: RegistrationId,
    pub academic_faculty: AcademicFacultyId,
    pub department: DepartmentId,
    pub course: CourseId,
    pub section: String,
    pub faculty: FacultyId,
    pub max_capacity: u32,
    pub days: Vec<Weekday>,
    pub start_time: String,
    pub end_time: String,
}

/// Result of successful offering creation.
#[derive(Debug, Clone)]
pub struct CreateOfferingResult {
    pub offering: OfferedCourse,
}

/// Handler for creating offerings.
pub struct CreateOfferingHandler {
    store: Arc<dyn SchedulingStore>,
    catalog: Catalog,
}

impl CreateOfferingHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(
        &self,
        cmd: CreateOfferingCommand,
    ) -> Result<CreateOfferingResult, OfferingError> {
        let section = Section::new(cmd.section)?;
        let slot = TimeSlot::parse(cmd.days, &cmd.start_time, &cmd.end_time)?;
        let assignment = Assignment::new(cmd.faculty, cmd.max_capacity, slot)?;

        let mut tx = self.store.begin().await?;

        let registration = require_registration(tx.as_mut(), &cmd.registration).await?;
        let academic_faculty = require(
            self.catalog.academic_faculties.as_ref(),
            &cmd.academic_faculty,
            Reference::AcademicFaculty,
        )
        .await?;
        let department = require(
            self.catalog.departments.as_ref(),
            &cmd.department,
            Reference::Department,
        )
        .await?;
        require(self.catalog.courses.as_ref(), &cmd.course, Reference::Course).await?;
        require(self.catalog.faculties.as_ref(), &cmd.faculty, Reference::Faculty).await?;

        department_belongs(&department, &academic_faculty.id)?;
        section_is_free(tx.as_mut(), registration.id(), &cmd.course, &section).await?;
        faculty_is_free(
            tx.as_mut(),
            registration.id(),
            &cmd.faculty,
            assignment.slot(),
            None,
        )
        .await?;

        let offering = OfferedCourse::new(
            OfferingId::new(),
            *registration.id(),
            *registration.semester(),
            CoursePlacement {
                academic_faculty: cmd.academic_faculty,
                department: cmd.department,
                course: cmd.course,
            },
            section,
            assignment,
        );
        tx.insert_offering(&offering).await?;
        tx.commit().await?;

        tracing::info!(
            offering_id = %offering.id(),
            registration_id = %offering.registration(),
            section = %offering.section(),
            "Offered course created"
        );

        Ok(CreateOfferingResult { offering })
    }
}
