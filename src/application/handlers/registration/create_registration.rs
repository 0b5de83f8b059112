//! CreateRegistrationHandler - Command handler for opening a semester
//! registration period.

use std::sync::Arc;

use crate::domain::foundation::{RegistrationId, SemesterId, Timestamp};
use crate::domain::registration::{
    RegistrationError, RegistrationTerms, SemesterRegistration, DEFAULT_MAX_CREDIT,
    DEFAULT_MIN_CREDIT,
};
use crate::ports::{Catalog, SchedulingStore};

/// Command to open a registration period for a semester.
#[derive(Debug, Clone)]
pub struct CreateRegistrationCommand {
    pub semester: SemesterId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub min_credit: Option<u16>,
    pub max_credit: Option<u16>,
}

/// Result of successful registration creation.
#[derive(Debug, Clone)]
pub struct CreateRegistrationResult {
    pub registration: SemesterRegistration,
}

/// Handler for creating registrations.
pub struct CreateRegistrationHandler {
    store: Arc<dyn SchedulingStore>,
    catalog: Catalog,
}

impl CreateRegistrationHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(
        &self,
        cmd: CreateRegistrationCommand,
    ) -> Result<CreateRegistrationResult, RegistrationError> {
        let terms = RegistrationTerms::with_credits(
            cmd.start_date,
            cmd.end_date,
            cmd.min_credit.unwrap_or(DEFAULT_MIN_CREDIT),
            cmd.max_credit.unwrap_or(DEFAULT_MAX_CREDIT),
        )?;

        let mut tx = self.store.begin().await?;

        // 1. Only one registration may be UPCOMING or ONGOING
        if let Some(active) = tx.find_active_registration().await? {
            return Err(RegistrationError::active_exists(*active.id(), active.status()));
        }

        // 2. Semester must exist in the catalog
        if !self.catalog.semesters.exists(&cmd.semester).await? {
            return Err(RegistrationError::semester_not_found(cmd.semester));
        }

        // 3. One registration per semester, whatever its status
        if tx.find_registration_by_semester(&cmd.semester).await?.is_some() {
            return Err(RegistrationError::semester_already_registered(cmd.semester));
        }

        let registration = SemesterRegistration::new(RegistrationId::new(), cmd.semester, terms);
        tx.insert_registration(&registration).await?;
        tx.commit().await?;

        tracing::info!(
            registration_id = %registration.id(),
            semester_id = %registration.semester(),
            "Semester registration created"
        );

        Ok(CreateRegistrationResult { registration })
    }
}
