//! UpdateOfferingHandler - Command handler for reassigning an offering's
//! faculty, capacity and schedule.

use std::sync::Arc;

use super::checks::{faculty_is_free, registration_is_upcoming, require, require_registration};
use crate::domain::foundation::{FacultyId, OfferingId};
use crate::domain::offering::{Assignment, OfferedCourse, OfferingError, Reference};
use crate::domain::schedule::{TimeSlot, Weekday};
use crate::ports::{Catalog, SchedulingStore};

/// Command to update an offering. Replaces the whole assignment.
#[derive(Debug, Clone)]
pub struct UpdateOfferingCommand {
    pub offering_id: OfferingId,
    pub faculty: FacultyId,
    pub max_capacity: u32,
    pub days: Vec<Weekday>,
    pub start_time: String,
    pub end_time: String,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateOfferingResult {
    pub offering: OfferedCourse,
    pub previous: Assignment,
}

/// Handler for updating offerings.
pub struct UpdateOfferingHandler {
    store: Arc<dyn SchedulingStore>,
    catalog: Catalog,
}

impl UpdateOfferingHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(
        &self,
        cmd: UpdateOfferingCommand,
    ) -> Result<UpdateOfferingResult, OfferingError> {
        let slot = TimeSlot::parse(cmd.days, &cmd.start_time, &cmd.end_time)?;
        let assignment = Assignment::new(cmd.faculty, cmd.max_capacity, slot)?;

        let mut tx = self.store.begin().await?;

        let mut offering = tx
            .find_offering(&cmd.offering_id)
            .await?
            .ok_or_else(|| OfferingError::not_found(Reference::Offering, cmd.offering_id))?;
        require(self.catalog.faculties.as_ref(), &cmd.faculty, Reference::Faculty).await?;

        let registration = require_registration(tx.as_mut(), offering.registration()).await?;
        registration_is_upcoming(&registration)?;

        faculty_is_free(
            tx.as_mut(),
            registration.id(),
            &cmd.faculty,
            assignment.slot(),
            Some(offering.id()),
        )
        .await?;

        let previous = offering.reassign(assignment);
        tx.update_offering(&offering).await?;
        tx.commit().await?;

        tracing::info!(
            offering_id = %offering.id(),
            faculty_id = %offering.faculty(),
            "Offered course updated"
        );

        Ok(UpdateOfferingResult { offering, previous })
    }
}
