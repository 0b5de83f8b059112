//! GetOfferingHandler - Query handler for a single offering.

use std::sync::Arc;

use crate::domain::foundation::OfferingId;
use crate::domain::offering::{OfferedCourse, OfferingError, Reference};
use crate::ports::SchedulingStore;

/// Query to get an offering by ID.
#[derive(Debug, Clone)]
pub struct GetOfferingQuery {
    pub offering_id: OfferingId,
}

/// Handler for retrieving an offering.
pub struct GetOfferingHandler {
    store: Arc<dyn SchedulingStore>,
}

impl GetOfferingHandler {
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetOfferingQuery) -> Result<OfferedCourse, OfferingError> {
        self.store
            .find_offering(&query.offering_id)
            .await?
            .ok_or_else(|| OfferingError::not_found(Reference::Offering, query.offering_id))
    }
}
