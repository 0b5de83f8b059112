//! DeleteRegistrationHandler - Cascade delete of a registration and its
//! offered courses.
//!
//! The offerings and the registration are removed in one transaction. A
//! failure at any stage rolls the whole transaction back and is reported as
//! `CascadeDeleteFailed` naming the stage.

use std::sync::Arc;

use crate::domain::foundation::RegistrationId;
use crate::domain::registration::{CascadeStage, RegistrationError, SemesterRegistration};
use crate::ports::SchedulingStore;

/// Command to delete a registration.
#[derive(Debug, Clone)]
pub struct DeleteRegistrationCommand {
    pub registration_id: RegistrationId,
}

/// Result of a successful cascade delete.
#[derive(Debug, Clone)]
pub struct DeleteRegistrationResult {
    pub registration: SemesterRegistration,
    pub deleted_offerings: u64,
}

/// Handler for deleting registrations.
pub struct DeleteRegistrationHandler {
    store: Arc<dyn SchedulingStore>,
}

impl DeleteRegistrationHandler {
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteRegistrationCommand,
    ) -> Result<DeleteRegistrationResult, RegistrationError> {
        let id = cmd.registration_id;

        let mut tx = self
            .store
            .begin()
            .await
            .map_err(|e| RegistrationError::cascade_failed(CascadeStage::Begin, e.message))?;

        let registration = tx
            .find_registration(&id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(id))?;
        registration.ensure_deletable()?;

        let deleted_offerings = tx
            .delete_offerings_by_registration(&id)
            .await
            .map_err(|e| RegistrationError::cascade_failed(CascadeStage::Offerings, e.message))?;

        let deleted = tx
            .delete_registration(&id)
            .await
            .map_err(|e| RegistrationError::cascade_failed(CascadeStage::Registration, e.message))?;
        if !deleted {
            return Err(RegistrationError::cascade_failed(
                CascadeStage::Registration,
                format!("registration {} vanished during delete", id),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| RegistrationError::cascade_failed(CascadeStage::Commit, e.message))?;

        tracing::info!(
            registration_id = %id,
            deleted_offerings,
            "Semester registration deleted"
        );

        Ok(DeleteRegistrationResult {
            registration,
            deleted_offerings,
        })
    }
}
