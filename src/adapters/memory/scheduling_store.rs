//! In-memory scheduling store.
//!
//! Transactions take an owned lock on the whole store, work on a private
//! copy, and write the copy back on commit. Dropping the transaction drops
//! the copy, which is the rollback. The same uniqueness rules the database
//! enforces with indexes are checked on every write.
//!
//! Useful for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, FacultyId, OfferingId, RegistrationId, SemesterId,
};
use crate::domain::offering::{OfferedCourse, Section};
use crate::domain::registration::SemesterRegistration;
use crate::ports::{SchedulingStore, SchedulingTransaction};

/// Operation at which an injected failure fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Begin,
    DeleteOfferings,
    DeleteRegistration,
    Commit,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    registrations: HashMap<RegistrationId, SemesterRegistration>,
    offerings: HashMap<OfferingId, OfferedCourse>,
}

/// In-memory implementation of [`SchedulingStore`].
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemorySchedulingStore::new());
/// store.fail_at(FailPoint::DeleteRegistration).await;
///
/// // ... run the cascade delete, expect CASCADE_DELETE_FAILED ...
///
/// assert_eq!(store.offering_count().await, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySchedulingStore {
    state: Arc<Mutex<StoreState>>,
    failure: Arc<Mutex<Option<FailPoint>>>,
}

impl InMemorySchedulingStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Makes every later transaction fail at `point` until cleared.
    pub async fn fail_at(&self, point: FailPoint) {
        *self.failure.lock().await = Some(point);
    }

    pub async fn clear_failure(&self) {
        *self.failure.lock().await = None;
    }

    /// Number of committed registrations.
    pub async fn registration_count(&self) -> usize {
        self.state.lock().await.registrations.len()
    }

    /// Number of committed offerings.
    pub async fn offering_count(&self) -> usize {
        self.state.lock().await.offerings.len()
    }

    /// Number of committed offerings referencing `registration`.
    pub async fn offering_count_for(&self, registration: &RegistrationId) -> usize {
        self.state
            .lock()
            .await
            .offerings
            .values()
            .filter(|o| o.registration() == registration)
            .count()
    }
}

#[async_trait]
impl SchedulingStore for InMemorySchedulingStore {
    async fn begin(&self) -> Result<Box<dyn SchedulingTransaction>, DomainError> {
        let fail_point = *self.failure.lock().await;
        if fail_point == Some(FailPoint::Begin) {
            return Err(injected(FailPoint::Begin));
        }

        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        tracing::debug!("In-memory transaction started");

        Ok(Box::new(InMemoryTransaction {
            guard,
            working,
            fail_point,
        }))
    }

    async fn find_registration(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        Ok(self.state.lock().await.registrations.get(id).cloned())
    }

    async fn find_offering(&self, id: &OfferingId) -> Result<Option<OfferedCourse>, DomainError> {
        Ok(self.state.lock().await.offerings.get(id).cloned())
    }
}

/// Exclusive transaction over an [`InMemorySchedulingStore`].
struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
    fail_point: Option<FailPoint>,
}

impl InMemoryTransaction {
    fn check(&self, point: FailPoint) -> Result<(), DomainError> {
        if self.fail_point == Some(point) {
            return Err(injected(point));
        }
        Ok(())
    }

    /// Mirrors the unique semester and single-active indexes.
    fn check_registration_constraints(
        &self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError> {
        for other in self.working.registrations.values() {
            if other.id() == registration.id() {
                continue;
            }
            if other.semester() == registration.semester() {
                return Err(DomainError::new(
                    ErrorCode::ActiveRegistrationExists,
                    format!("Semester {} is already registered", registration.semester()),
                ));
            }
            if other.status().is_active() && registration.status().is_active() {
                return Err(DomainError::new(
                    ErrorCode::ActiveRegistrationExists,
                    format!("Registration {} is already {}", other.id(), other.status()),
                ));
            }
        }
        Ok(())
    }

    /// Mirrors the unique (registration, course, section) index.
    fn check_offering_constraints(&self, offering: &OfferedCourse) -> Result<(), DomainError> {
        let duplicate = self.working.offerings.values().any(|other| {
            other.id() != offering.id()
                && other.registration() == offering.registration()
                && other.course() == offering.course()
                && other.section() == offering.section()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateSection,
                format!("Section '{}' already exists", offering.section()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SchedulingTransaction for InMemoryTransaction {
    async fn find_registration(
        &mut self,
        id: &RegistrationId,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        Ok(self.working.registrations.get(id).cloned())
    }

    async fn find_active_registration(
        &mut self,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        Ok(self
            .working
            .registrations
            .values()
            .find(|r| r.status().is_active())
            .cloned())
    }

    async fn find_registration_by_semester(
        &mut self,
        semester: &SemesterId,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        Ok(self
            .working
            .registrations
            .values()
            .find(|r| r.semester() == semester)
            .cloned())
    }

    async fn insert_registration(
        &mut self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError> {
        if self.working.registrations.contains_key(registration.id()) {
            return Err(DomainError::database(format!(
                "Registration {} already exists",
                registration.id()
            )));
        }
        self.check_registration_constraints(registration)?;
        self.working
            .registrations
            .insert(*registration.id(), registration.clone());
        Ok(())
    }

    async fn update_registration(
        &mut self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError> {
        if !self.working.registrations.contains_key(registration.id()) {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Semester registration not found: {}", registration.id()),
            ));
        }
        self.check_registration_constraints(registration)?;
        self.working
            .registrations
            .insert(*registration.id(), registration.clone());
        Ok(())
    }

    async fn delete_registration(&mut self, id: &RegistrationId) -> Result<bool, DomainError> {
        self.check(FailPoint::DeleteRegistration)?;
        if self.working.offerings.values().any(|o| o.registration() == id) {
            return Err(DomainError::database(format!(
                "Registration {} is still referenced by offered courses",
                id
            )));
        }
        Ok(self.working.registrations.remove(id).is_some())
    }

    async fn find_offering(&mut self, id: &OfferingId) -> Result<Option<OfferedCourse>, DomainError> {
        Ok(self.working.offerings.get(id).cloned())
    }

    async fn find_offering_by_section(
        &mut self,
        registration: &RegistrationId,
        course: &CourseId,
        section: &Section,
    ) -> Result<Option<OfferedCourse>, DomainError> {
        Ok(self
            .working
            .offerings
            .values()
            .find(|o| {
                o.registration() == registration && o.course() == course && o.section() == section
            })
            .cloned())
    }

    async fn find_faculty_offerings(
        &mut self,
        registration: &RegistrationId,
        faculty: &FacultyId,
    ) -> Result<Vec<OfferedCourse>, DomainError> {
        Ok(self
            .working
            .offerings
            .values()
            .filter(|o| o.registration() == registration && o.faculty() == faculty)
            .cloned()
            .collect())
    }

    async fn insert_offering(&mut self, offering: &OfferedCourse) -> Result<(), DomainError> {
        if self.working.offerings.contains_key(offering.id()) {
            return Err(DomainError::database(format!(
                "Offered course {} already exists",
                offering.id()
            )));
        }
        if !self
            .working
            .registrations
            .contains_key(offering.registration())
        {
            return Err(DomainError::database(format!(
                "Offered course references missing registration {}",
                offering.registration()
            )));
        }
        self.check_offering_constraints(offering)?;
        self.working.offerings.insert(*offering.id(), offering.clone());
        Ok(())
    }

    async fn update_offering(&mut self, offering: &OfferedCourse) -> Result<(), DomainError> {
        if !self.working.offerings.contains_key(offering.id()) {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Offered course not found: {}", offering.id()),
            ));
        }
        self.check_offering_constraints(offering)?;
        self.working.offerings.insert(*offering.id(), offering.clone());
        Ok(())
    }

    async fn delete_offering(&mut self, id: &OfferingId) -> Result<bool, DomainError> {
        Ok(self.working.offerings.remove(id).is_some())
    }

    async fn delete_offerings_by_registration(
        &mut self,
        registration: &RegistrationId,
    ) -> Result<u64, DomainError> {
        self.check(FailPoint::DeleteOfferings)?;
        let before = self.working.offerings.len();
        self.working
            .offerings
            .retain(|_, o| o.registration() != registration);
        Ok((before - self.working.offerings.len()) as u64)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.check(FailPoint::Commit)?;
        let InMemoryTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        tracing::debug!("In-memory transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        tracing::debug!("In-memory transaction rolled back");
        Ok(())
    }
}

fn injected(point: FailPoint) -> DomainError {
    DomainError::database(format!("injected failure at {:?}", point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AcademicFacultyId, DepartmentId, RegistrationStatus, Timestamp};
    use crate::domain::offering::{Assignment, CoursePlacement};
    use crate::domain::registration::RegistrationTerms;
    use crate::domain::schedule::{TimeSlot, Weekday};

    fn test_registration() -> SemesterRegistration {
        let start = Timestamp::now();
        let terms = RegistrationTerms::new(start, start.plus_days(30)).unwrap();
        SemesterRegistration::new(RegistrationId::new(), SemesterId::new(), terms)
    }

    fn test_offering(registration: &SemesterRegistration, section: &str) -> OfferedCourse {
        let slot = TimeSlot::parse([Weekday::Sun, Weekday::Tue], "09:00", "10:30").unwrap();
        OfferedCourse::new(
            OfferingId::new(),
            *registration.id(),
            *registration.semester(),
            CoursePlacement {
                academic_faculty: AcademicFacultyId::new(),
                department: DepartmentId::new(),
                course: CourseId::new(),
            },
            Section::new(section).unwrap(),
            Assignment::new(FacultyId::new(), 30, slot).unwrap(),
        )
    }

    async fn seed(store: &InMemorySchedulingStore) -> (SemesterRegistration, OfferedCourse) {
        let registration = test_registration();
        let offering = test_offering(&registration, "A");
        let mut tx = store.begin().await.unwrap();
        tx.insert_registration(&registration).await.unwrap();
        tx.insert_offering(&offering).await.unwrap();
        tx.commit().await.unwrap();
        (registration, offering)
    }

    #[tokio::test]
    async fn commit_makes_writes_visible() {
        let store = InMemorySchedulingStore::new();
        let (registration, offering) = seed(&store).await;

        assert_eq!(
            store.find_registration(registration.id()).await.unwrap(),
            Some(registration)
        );
        assert_eq!(store.find_offering(offering.id()).await.unwrap(), Some(offering));
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() {
        let store = InMemorySchedulingStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_registration(&test_registration()).await.unwrap();
        }
        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn explicit_rollback_discards_writes() {
        let store = InMemorySchedulingStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_registration(&test_registration()).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn transaction_sees_its_own_writes() {
        let store = InMemorySchedulingStore::new();
        let registration = test_registration();
        let mut tx = store.begin().await.unwrap();
        tx.insert_registration(&registration).await.unwrap();

        let active = tx.find_active_registration().await.unwrap();
        assert_eq!(active.map(|r| *r.id()), Some(*registration.id()));
    }

    #[tokio::test]
    async fn second_active_registration_violates_constraint() {
        let store = InMemorySchedulingStore::new();
        seed(&store).await;

        let mut tx = store.begin().await.unwrap();
        let err = tx
            .insert_registration(&test_registration())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ActiveRegistrationExists);
    }

    #[tokio::test]
    async fn ended_registration_does_not_block_new_one() {
        let store = InMemorySchedulingStore::new();
        let (mut registration, _) = seed(&store).await;
        registration.transition_to(RegistrationStatus::Ongoing).unwrap();
        registration.transition_to(RegistrationStatus::Ended).unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.update_registration(&registration).await.unwrap();
        tx.insert_registration(&test_registration()).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.registration_count().await, 2);
    }

    #[tokio::test]
    async fn duplicate_section_violates_constraint() {
        let store = InMemorySchedulingStore::new();
        let (registration, offering) = seed(&store).await;

        let duplicate = OfferedCourse::new(
            OfferingId::new(),
            *registration.id(),
            *registration.semester(),
            *offering.placement(),
            Section::new("A").unwrap(),
            offering.assignment().clone(),
        );

        let mut tx = store.begin().await.unwrap();
        let err = tx.insert_offering(&duplicate).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSection);
    }

    #[tokio::test]
    async fn delete_registration_refuses_while_offerings_reference_it() {
        let store = InMemorySchedulingStore::new();
        let (registration, _) = seed(&store).await;

        let mut tx = store.begin().await.unwrap();
        assert!(tx.delete_registration(registration.id()).await.is_err());
    }

    #[tokio::test]
    async fn cascade_delete_removes_everything_on_commit() {
        let store = InMemorySchedulingStore::new();
        let (registration, _) = seed(&store).await;

        let mut tx = store.begin().await.unwrap();
        let removed = tx
            .delete_offerings_by_registration(registration.id())
            .await
            .unwrap();
        assert!(tx.delete_registration(registration.id()).await.unwrap());
        tx.commit().await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.registration_count().await, 0);
        assert_eq!(store.offering_count().await, 0);
    }

    #[tokio::test]
    async fn injected_commit_failure_leaves_state_untouched() {
        let store = InMemorySchedulingStore::new();
        let (registration, _) = seed(&store).await;
        store.fail_at(FailPoint::Commit).await;

        let mut tx = store.begin().await.unwrap();
        tx.delete_offerings_by_registration(registration.id())
            .await
            .unwrap();
        assert!(tx.commit().await.is_err());

        assert_eq!(store.offering_count_for(registration.id()).await, 1);
        assert_eq!(store.registration_count().await, 1);
    }

    #[tokio::test]
    async fn cleared_failure_no_longer_fires() {
        let store = InMemorySchedulingStore::new();
        store.fail_at(FailPoint::Begin).await;
        assert!(store.begin().await.is_err());

        store.clear_failure().await;
        assert!(store.begin().await.is_ok());
    }
}
