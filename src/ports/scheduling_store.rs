//! Scheduling store port (registrations and offerings).
//!
//! Every mutation runs inside a [`SchedulingTransaction`]: the invariant
//! checks (single active registration, one registration per semester,
//! duplicate section, faculty time conflict) and the write they guard read
//! and write through the same transaction, so two concurrent requests cannot
//! both pass a check that only one of them may pass.
//!
//! # Scoping
//!
//! A transaction is a scoped resource. Dropping it without calling
//! [`SchedulingTransaction::commit`] rolls back every write issued through it;
//! that covers early returns via `?`, panics, and cancelled futures alike.
//!
//! ```ignore
//! let mut tx = self.store.begin().await?;
//! if let Some(active) = tx.find_active_registration().await? {
//!     return Err(RegistrationError::active_exists(*active.id(), active.status()));
//! }   // <- tx dropped here, nothing written
//! tx.insert_registration(&registration).await?;
//! tx.commit().await?;
//! ```
//!
//! Reads inside a transaction observe committed state plus the
//! transaction's own earlier writes.

use async_trait::async_trait;

use crate::domain::foundation::{
    CourseId, DomainError, FacultyId, OfferingId, RegistrationId, SemesterId,
};
use crate::domain::offering::{OfferedCourse, Section};
use crate::domain::registration::SemesterRegistration;

/// Entry point to the registration/offering store.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    /// Opens a serialisable transaction.
    async fn begin(&self) -> Result<Box<dyn SchedulingTransaction>, DomainError>;

    /// Reads a registration outside any transaction.
    async fn find_registration(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<SemesterRegistration>, DomainError>;

    /// Reads an offering outside any transaction.
    async fn find_offering(&self, id: &OfferingId) -> Result<Option<OfferedCourse>, DomainError>;
}

/// Unit of work over registrations and offerings.
///
/// Implementations must guarantee that either every write issued through
/// the transaction becomes visible on `commit`, or none does.
#[async_trait]
pub trait SchedulingTransaction: Send {
    // ── registrations ───────────────────────────────────────────────────────

    async fn find_registration(
        &mut self,
        id: &RegistrationId,
    ) -> Result<Option<SemesterRegistration>, DomainError>;

    /// Finds the registration currently `UPCOMING` or `ONGOING`, if any.
    async fn find_active_registration(&mut self)
        -> Result<Option<SemesterRegistration>, DomainError>;

    /// Finds the registration of any status opened for `semester`.
    async fn find_registration_by_semester(
        &mut self,
        semester: &SemesterId,
    ) -> Result<Option<SemesterRegistration>, DomainError>;

    async fn insert_registration(
        &mut self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the registration doesn't exist
    async fn update_registration(
        &mut self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError>;

    /// Deletes a registration. Returns false if it did not exist.
    async fn delete_registration(&mut self, id: &RegistrationId) -> Result<bool, DomainError>;

    // ── offerings ───────────────────────────────────────────────────────────

    async fn find_offering(&mut self, id: &OfferingId) -> Result<Option<OfferedCourse>, DomainError>;

    /// Finds the offering with this `(registration, course, section)`.
    async fn find_offering_by_section(
        &mut self,
        registration: &RegistrationId,
        course: &CourseId,
        section: &Section,
    ) -> Result<Option<OfferedCourse>, DomainError>;

    /// All offerings taught by `faculty` within `registration`.
    async fn find_faculty_offerings(
        &mut self,
        registration: &RegistrationId,
        faculty: &FacultyId,
    ) -> Result<Vec<OfferedCourse>, DomainError>;

    async fn insert_offering(&mut self, offering: &OfferedCourse) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the offering doesn't exist
    async fn update_offering(&mut self, offering: &OfferedCourse) -> Result<(), DomainError>;

    /// Deletes an offering. Returns false if it did not exist.
    async fn delete_offering(&mut self, id: &OfferingId) -> Result<bool, DomainError>;

    /// Deletes every offering referencing `registration`; returns the count.
    async fn delete_offerings_by_registration(
        &mut self,
        registration: &RegistrationId,
    ) -> Result<u64, DomainError>;

    // ── completion ──────────────────────────────────────────────────────────

    /// Makes all writes visible atomically.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    /// Discards all writes. Equivalent to dropping the transaction, but
    /// reports failures.
    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}
