//! SemesterRegistration aggregate.
//!
//! A registration is the administrative window during which offerings for one
//! semester may be created and modified. Its status only ever moves forward:
//! `UPCOMING → ONGOING → ENDED`.
//!
//! # Ownership
//!
//! Offerings reference a registration by ID but the registration does NOT own
//! them. The cascade delete is coordinated by the application layer.

use serde::{Deserialize, Serialize};

use super::errors::RegistrationError;
use crate::domain::foundation::{
    RegistrationId, RegistrationStatus, SemesterId, StateMachine, Timestamp, ValidationError,
};

/// Default minimum credit load per student.
pub const DEFAULT_MIN_CREDIT: u16 = 3;

/// Default maximum credit load per student.
pub const DEFAULT_MAX_CREDIT: u16 = 15;

/// Enrollment window and credit policy of a registration.
///
/// # Invariants
///
/// - `start_date < end_date`
/// - `0 < max_credit` and `min_credit <= max_credit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationTerms {
    start_date: Timestamp,
    end_date: Timestamp,
    min_credit: u16,
    max_credit: u16,
}

impl RegistrationTerms {
    /// Creates terms with the default credit policy.
    pub fn new(start_date: Timestamp, end_date: Timestamp) -> Result<Self, ValidationError> {
        Self::with_credits(start_date, end_date, DEFAULT_MIN_CREDIT, DEFAULT_MAX_CREDIT)
    }

    /// Creates terms with an explicit credit policy.
    pub fn with_credits(
        start_date: Timestamp,
        end_date: Timestamp,
        min_credit: u16,
        max_credit: u16,
    ) -> Result<Self, ValidationError> {
        if !start_date.is_before(&end_date) {
            return Err(ValidationError::invalid_format(
                "end_date",
                "end date must be after start date",
            ));
        }
        if max_credit == 0 {
            return Err(ValidationError::out_of_range(
                "max_credit",
                1,
                u16::MAX as i32,
                0,
            ));
        }
        if min_credit > max_credit {
            return Err(ValidationError::out_of_range(
                "min_credit",
                0,
                max_credit as i32,
                min_credit as i32,
            ));
        }
        Ok(Self {
            start_date,
            end_date,
            min_credit,
            max_credit,
        })
    }

    pub fn start_date(&self) -> &Timestamp {
        &self.start_date
    }

    pub fn end_date(&self) -> &Timestamp {
        &self.end_date
    }

    pub fn min_credit(&self) -> u16 {
        self.min_credit
    }

    pub fn max_credit(&self) -> u16 {
        self.max_credit
    }

    /// Applies a partial update, re-validating the merged result.
    pub fn merge(&self, changes: &TermsUpdate) -> Result<Self, ValidationError> {
        Self::with_credits(
            changes.start_date.unwrap_or(self.start_date),
            changes.end_date.unwrap_or(self.end_date),
            changes.min_credit.unwrap_or(self.min_credit),
            changes.max_credit.unwrap_or(self.max_credit),
        )
    }
}

/// Partial update of the non-status fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsUpdate {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub min_credit: Option<u16>,
    pub max_credit: Option<u16>,
}

impl TermsUpdate {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.min_credit.is_none()
            && self.max_credit.is_none()
    }
}

/// Semester registration aggregate.
///
/// # Invariants
///
/// - `status` only changes along `UPCOMING → ONGOING → ENDED`
/// - `terms` only change while `UPCOMING`
/// - deletion is only allowed while `UPCOMING`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterRegistration {
    id: RegistrationId,
    semester: SemesterId,
    status: RegistrationStatus,
    terms: RegistrationTerms,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SemesterRegistration {
    /// Opens a new registration in `UPCOMING`.
    ///
    /// The single-active and one-per-semester rules span multiple aggregates
    /// and are enforced by the creating handler.
    pub fn new(id: RegistrationId, semester: SemesterId, terms: RegistrationTerms) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            semester,
            status: RegistrationStatus::Upcoming,
            terms,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a registration from persistence (no validation).
    pub fn reconstitute(
        id: RegistrationId,
        semester: SemesterId,
        status: RegistrationStatus,
        terms: RegistrationTerms,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            semester,
            status,
            terms,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RegistrationId {
        &self.id
    }

    pub fn semester(&self) -> &SemesterId {
        &self.semester
    }

    pub fn status(&self) -> RegistrationStatus {
        self.status
    }

    pub fn terms(&self) -> &RegistrationTerms {
        &self.terms
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the registration to `target` along an allowed edge.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` for backward moves, skips, no-ops and anything
    ///   out of `ENDED`
    pub fn transition_to(&mut self, target: RegistrationStatus) -> Result<(), RegistrationError> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replaces the enrollment window and credit policy.
    ///
    /// # Errors
    ///
    /// - `ImmutableState` unless `UPCOMING`
    /// - `ValidationFailed` if the merged terms are inconsistent
    pub fn update_terms(&mut self, changes: &TermsUpdate) -> Result<(), RegistrationError> {
        self.ensure_mutable()?;
        self.terms = self.terms.merge(changes)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Checks that the registration may be deleted.
    ///
    /// # Errors
    ///
    /// - `ImmutableState` unless `UPCOMING`
    pub fn ensure_deletable(&self) -> Result<(), RegistrationError> {
        self.ensure_mutable()
    }

    fn ensure_mutable(&self) -> Result<(), RegistrationError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(RegistrationError::immutable(self.status))
        }
    }
}
