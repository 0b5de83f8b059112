//! GetRegistrationHandler - Query handler for a single registration.

use std::sync::Arc;

use crate::domain::foundation::RegistrationId;
use crate::domain::registration::{RegistrationError, SemesterRegistration};
use crate::ports::SchedulingStore;

/// Query to get a registration by ID.
#[derive(Debug, Clone)]
pub struct GetRegistrationQuery {
    pub registration_id: RegistrationId,
}

/// Handler for retrieving a registration.
pub struct GetRegistrationHandler {
    store: Arc<dyn SchedulingStore>,
}

impl GetRegistrationHandler {
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetRegistrationQuery,
    ) -> Result<SemesterRegistration, RegistrationError> {
        self.store
            .find_registration(&query.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(query.registration_id))
    }
}
