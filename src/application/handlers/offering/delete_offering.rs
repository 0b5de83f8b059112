//! DeleteOfferingHandler - Command handler for withdrawing an offering.

use std::sync::Arc;

use super::checks::{registration_is_upcoming, require_registration};
use crate::domain::foundation::OfferingId;
use crate::domain::offering::{OfferedCourse, OfferingError, Reference};
use crate::ports::SchedulingStore;

/// Command to delete an offering.
#[derive(Debug, Clone)]
pub struct DeleteOfferingCommand {
    pub offering_id: OfferingId,
}

/// Handler for deleting offerings.
pub struct DeleteOfferingHandler {
    store: Arc<dyn SchedulingStore>,
}

impl DeleteOfferingHandler {
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    /// Deletes the offering and returns it.
    pub async fn handle(&self, cmd: DeleteOfferingCommand) -> Result<OfferedCourse, OfferingError> {
        let mut tx = self.store.begin().await?;

        let offering = tx
            .find_offering(&cmd.offering_id)
            .await?
            .ok_or_else(|| OfferingError::not_found(Reference::Offering, cmd.offering_id))?;
        let registration = require_registration(tx.as_mut(), offering.registration()).await?;
        registration_is_upcoming(&registration)?;

        if !tx.delete_offering(offering.id()).await? {
            return Err(OfferingError::not_found(Reference::Offering, offering.id()));
        }
        tx.commit().await?;

        tracing::info!(offering_id = %offering.id(), "Offered course deleted");

        Ok(offering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::fixtures::Fixture;
    use crate::domain::foundation::RegistrationStatus;
    use crate::domain::schedule::Weekday;

    #[tokio::test]
    async fn deletes_offering_of_upcoming_registration() {
        let fx = Fixture::new();
        let registration = fx.seed_registration().await;
        let offering = fx
            .seed_offering(&registration, "A", &[Weekday::Sat], "08:00", "09:00")
            .await;
        let handler = DeleteOfferingHandler::new(fx.store());

        let deleted = handler
            .handle(DeleteOfferingCommand {
                offering_id: *offering.id(),
            })
            .await
            .unwrap();

        assert_eq!(deleted, offering);
        assert_eq!(fx.store.offering_count().await, 0);
    }

    #[tokio::test]
    async fn refuses_once_registration_left_upcoming() {
        let fx = Fixture::new();
        let mut registration = fx.seed_registration().await;
        let offering = fx
            .seed_offering(&registration, "A", &[Weekday::Sat], "08:00", "09:00")
            .await;
        registration.transition_to(RegistrationStatus::Ongoing).unwrap();
        fx.save_registration(&registration).await;
        let handler = DeleteOfferingHandler::new(fx.store());

        let err = handler
            .handle(DeleteOfferingCommand {
                offering_id: *offering.id(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, OfferingError::immutable(RegistrationStatus::Ongoing));
        assert_eq!(fx.store.offering_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_offering_is_not_found() {
        let fx = Fixture::new();
        let handler = DeleteOfferingHandler::new(fx.store());
        let id = OfferingId::new();

        let err = handler
            .handle(DeleteOfferingCommand { offering_id: id })
            .await
            .unwrap_err();

        assert_eq!(err, OfferingError::not_found(Reference::Offering, id));
    }
}
