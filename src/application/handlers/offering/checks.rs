//! Validator stages shared by the offering handlers.
//!
//! Each stage checks one rule and fails with its own error kind. Handlers
//! chain them with `?`, so the first failure ends the chain before any write.

use std::fmt::{Debug, Display};

use crate::domain::catalog::Department;
use crate::domain::foundation::{
    AcademicFacultyId, CourseId, FacultyId, OfferingId, RegistrationId,
};
use crate::domain::offering::{OfferingError, Reference, Section};
use crate::domain::registration::SemesterRegistration;
use crate::domain::schedule::{has_conflict, TimeSlot};
use crate::ports::{ReferenceReader, SchedulingTransaction};

/// Loads a catalog record or fails with `NotFound` for `reference`.
pub(super) async fn require<T, ID>(
    reader: &dyn ReferenceReader<T, ID>,
    id: &ID,
    reference: Reference,
) -> Result<T, OfferingError>
where
    T: Send + Sync,
    ID: Send + Sync + Debug + Display + 'static,
{
    reader
        .get(id)
        .await?
        .ok_or_else(|| OfferingError::not_found(reference, id))
}

pub(super) async fn require_registration(
    tx: &mut dyn SchedulingTransaction,
    id: &RegistrationId,
) -> Result<SemesterRegistration, OfferingError> {
    tx.find_registration(id)
        .await?
        .ok_or_else(|| OfferingError::not_found(Reference::Registration, id))
}

/// Offerings can only change while their registration is `UPCOMING`.
pub(super) fn registration_is_upcoming(
    registration: &SemesterRegistration,
) -> Result<(), OfferingError> {
    if registration.status().is_mutable() {
        Ok(())
    } else {
        Err(OfferingError::immutable(registration.status()))
    }
}

pub(super) fn department_belongs(
    department: &Department,
    academic_faculty: &AcademicFacultyId,
) -> Result<(), OfferingError> {
    if department.belongs_to(academic_faculty) {
        Ok(())
    } else {
        Err(OfferingError::integrity_mismatch(
            department.id,
            *academic_faculty,
        ))
    }
}

pub(super) async fn section_is_free(
    tx: &mut dyn SchedulingTransaction,
    registration: &RegistrationId,
    course: &CourseId,
    section: &Section,
) -> Result<(), OfferingError> {
    match tx
        .find_offering_by_section(registration, course, section)
        .await?
    {
        Some(_) => Err(OfferingError::duplicate_section(*course, section.clone())),
        None => Ok(()),
    }
}

/// Checks `slot` against the faculty's other offerings in `registration`.
///
/// `exclude` removes the offering being updated from its own conflict scope.
pub(super) async fn faculty_is_free(
    tx: &mut dyn SchedulingTransaction,
    registration: &RegistrationId,
    faculty: &FacultyId,
    slot: &TimeSlot,
    exclude: Option<&OfferingId>,
) -> Result<(), OfferingError> {
    let assigned = tx.find_faculty_offerings(registration, faculty).await?;
    let existing = assigned
        .iter()
        .filter(|o| Some(o.id()) != exclude)
        .map(|o| o.slot());

    if has_conflict(existing, slot) {
        return Err(OfferingError::schedule_conflict(*faculty));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::fixtures::Fixture;
    use crate::domain::foundation::{ErrorCode, RegistrationStatus};
    use crate::domain::schedule::Weekday;
    use crate::ports::SchedulingStore;

    #[tokio::test]
    async fn require_reports_the_missing_reference() {
        let fx = Fixture::new();
        let missing = CourseId::new();

        let err = require(fx.catalog.courses.as_ref(), &missing, Reference::Course)
            .await
            .unwrap_err();

        assert_eq!(err, OfferingError::not_found(Reference::Course, missing));
    }

    #[tokio::test]
    async fn require_returns_the_record() {
        let fx = Fixture::new();

        let department = require(
            fx.catalog.departments.as_ref(),
            &fx.computing.id,
            Reference::Department,
        )
        .await
        .unwrap();

        assert_eq!(department, fx.computing);
    }

    #[test]
    fn department_must_belong_to_academic_faculty() {
        let fx = Fixture::new();

        assert!(department_belongs(&fx.computing, &fx.engineering.id).is_ok());
        assert_eq!(
            department_belongs(&fx.computing, &fx.science.id)
                .unwrap_err()
                .code(),
            ErrorCode::IntegrityMismatch
        );
    }

    #[tokio::test]
    async fn only_upcoming_registrations_accept_changes() {
        let fx = Fixture::new();
        let mut registration = fx.seed_registration().await;
        assert!(registration_is_upcoming(&registration).is_ok());

        registration.transition_to(RegistrationStatus::Ongoing).unwrap();
        assert_eq!(
            registration_is_upcoming(&registration).unwrap_err(),
            OfferingError::immutable(RegistrationStatus::Ongoing)
        );
    }

    #[tokio::test]
    async fn section_taken_within_same_registration_and_course() {
        let fx = Fixture::new();
        let registration = fx.seed_registration().await;
        fx.seed_offering(&registration, "A", &[Weekday::Sun], "09:00", "10:00")
            .await;
        let mut tx = fx.store.begin().await.unwrap();

        let taken = section_is_free(
            tx.as_mut(),
            registration.id(),
            &fx.compilers.id,
            &Section::new("A").unwrap(),
        )
        .await;
        let other_course = section_is_free(
            tx.as_mut(),
            registration.id(),
            &fx.databases.id,
            &Section::new("A").unwrap(),
        )
        .await;

        assert_eq!(taken.unwrap_err().code(), ErrorCode::DuplicateSection);
        assert!(other_course.is_ok());
    }

    #[tokio::test]
    async fn faculty_conflict_ignores_excluded_offering() {
        let fx = Fixture::new();
        let registration = fx.seed_registration().await;
        let offering = fx
            .seed_offering(&registration, "A", &[Weekday::Mon], "10:00", "11:00")
            .await;
        let moved = TimeSlot::parse([Weekday::Mon], "10:30", "11:30").unwrap();
        let mut tx = fx.store.begin().await.unwrap();

        let against_all =
            faculty_is_free(tx.as_mut(), registration.id(), &fx.ada.id, &moved, None).await;
        let excluding_self = faculty_is_free(
            tx.as_mut(),
            registration.id(),
            &fx.ada.id,
            &moved,
            Some(offering.id()),
        )
        .await;

        assert_eq!(
            against_all.unwrap_err(),
            OfferingError::schedule_conflict(fx.ada.id)
        );
        assert!(excluding_self.is_ok());
    }

    #[tokio::test]
    async fn back_to_back_slots_do_not_conflict() {
        let fx = Fixture::new();
        let registration = fx.seed_registration().await;
        fx.seed_offering(&registration, "A", &[Weekday::Mon], "10:00", "11:00")
            .await;
        let next = TimeSlot::parse([Weekday::Mon], "11:00", "12:00").unwrap();
        let mut tx = fx.store.begin().await.unwrap();

        assert!(
            faculty_is_free(tx.as_mut(), registration.id(), &fx.ada.id, &next, None)
                .await
                .is_ok()
        );
    }
}
