//! UpdateRegistrationHandler - Command handler for advancing a registration's
//! status and editing its terms.

use std::sync::Arc;

use crate::domain::foundation::{RegistrationId, RegistrationStatus};
use crate::domain::registration::{RegistrationError, SemesterRegistration, TermsUpdate};
use crate::ports::SchedulingStore;

/// Command to update a registration.
///
/// `status` moves the registration along its lifecycle. `terms` edits the
/// enrollment window and credit policy, which is only allowed while the
/// registration is `UPCOMING`.
#[derive(Debug, Clone, Default)]
pub struct UpdateRegistrationCommand {
    pub registration_id: RegistrationId,
    pub status: Option<RegistrationStatus>,
    pub terms: TermsUpdate,
}

impl UpdateRegistrationCommand {
    /// Status-only update.
    pub fn status(registration_id: RegistrationId, status: RegistrationStatus) -> Self {
        Self {
            registration_id,
            status: Some(status),
            terms: TermsUpdate::default(),
        }
    }
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateRegistrationResult {
    pub registration: SemesterRegistration,
    pub previous_status: RegistrationStatus,
}

/// Handler for updating registrations.
pub struct UpdateRegistrationHandler {
    store: Arc<dyn SchedulingStore>,
}

impl UpdateRegistrationHandler {
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateRegistrationCommand,
    ) -> Result<UpdateRegistrationResult, RegistrationError> {
        if cmd.status.is_none() && cmd.terms.is_empty() {
            return Err(RegistrationError::validation(
                "payload",
                "update must change the status or at least one term",
            ));
        }

        let mut tx = self.store.begin().await?;

        let mut registration = tx
            .find_registration(&cmd.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(cmd.registration_id))?;
        let previous_status = registration.status();

        // Terms first: they can only change while still UPCOMING
        if !cmd.terms.is_empty() {
            registration.update_terms(&cmd.terms)?;
        }

        if let Some(target) = cmd.status {
            registration.transition_to(target)?;
        }

        tx.update_registration(&registration).await?;
        tx.commit().await?;

        tracing::info!(
            registration_id = %registration.id(),
            from = %previous_status,
            to = %registration.status(),
            "Semester registration updated"
        );

        Ok(UpdateRegistrationResult {
            registration,
            previous_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::fixtures::Fixture;
    use crate::domain::foundation::{ErrorCode, InvalidTransition};
    use RegistrationStatus::*;

    async fn registration_in(fx: &Fixture, status: RegistrationStatus) -> SemesterRegistration {
        let mut registration = fx.seed_registration().await;
        if status != Upcoming {
            registration.transition_to(Ongoing).unwrap();
        }
        if status == Ended {
            registration.transition_to(Ended).unwrap();
        }
        fx.save_registration(&registration).await;
        registration
    }

    async fn stored_status(fx: &Fixture, id: &RegistrationId) -> RegistrationStatus {
        fx.store
            .find_registration(id)
            .await
            .unwrap()
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn follows_the_lifecycle_forward() {
        let fx = Fixture::new();
        let registration = registration_in(&fx, Upcoming).await;
        let handler = UpdateRegistrationHandler::new(fx.store());

        let result = handler
            .handle(UpdateRegistrationCommand::status(*registration.id(), Ongoing))
            .await
            .unwrap();
        assert_eq!(result.previous_status, Upcoming);
        assert_eq!(result.registration.status(), Ongoing);

        handler
            .handle(UpdateRegistrationCommand::status(*registration.id(), Ended))
            .await
            .unwrap();
        assert_eq!(stored_status(&fx, registration.id()).await, Ended);
    }

    #[tokio::test]
    async fn rejects_illegal_edges() {
        let cases = [
            (Upcoming, Ended),
            (Upcoming, Upcoming),
            (Ongoing, Upcoming),
            (Ongoing, Ongoing),
            (Ended, Upcoming),
            (Ended, Ongoing),
            (Ended, Ended),
        ];

        for (from, to) in cases {
            let fx = Fixture::new();
            let registration = registration_in(&fx, from).await;
            let handler = UpdateRegistrationHandler::new(fx.store());

            let err = handler
                .handle(UpdateRegistrationCommand::status(*registration.id(), to))
                .await
                .unwrap_err();

            assert_eq!(
                err,
                RegistrationError::IllegalTransition(InvalidTransition { from, to }),
                "{} -> {}",
                from,
                to
            );
            assert_eq!(err.code(), ErrorCode::IllegalTransition);
            assert_eq!(stored_status(&fx, registration.id()).await, from);
        }
    }

    #[tokio::test]
    async fn edits_terms_while_upcoming() {
        let fx = Fixture::new();
        let registration = registration_in(&fx, Upcoming).await;
        let handler = UpdateRegistrationHandler::new(fx.store());

        let result = handler
            .handle(UpdateRegistrationCommand {
                registration_id: *registration.id(),
                status: None,
                terms: TermsUpdate {
                    max_credit: Some(21),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(result.registration.terms().max_credit(), 21);
        assert_eq!(result.registration.status(), Upcoming);
    }

    #[tokio::test]
    async fn terms_are_frozen_once_ongoing() {
        let fx = Fixture::new();
        let registration = registration_in(&fx, Ongoing).await;
        let handler = UpdateRegistrationHandler::new(fx.store());

        let err = handler
            .handle(UpdateRegistrationCommand {
                registration_id: *registration.id(),
                status: Some(Ended),
                terms: TermsUpdate {
                    min_credit: Some(6),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err, RegistrationError::immutable(Ongoing));
        assert_eq!(stored_status(&fx, registration.id()).await, Ongoing);
    }

    #[tokio::test]
    async fn terms_and_status_change_together_while_upcoming() {
        let fx = Fixture::new();
        let registration = registration_in(&fx, Upcoming).await;
        let handler = UpdateRegistrationHandler::new(fx.store());

        let result = handler
            .handle(UpdateRegistrationCommand {
                registration_id: *registration.id(),
                status: Some(Ongoing),
                terms: TermsUpdate {
                    min_credit: Some(6),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(result.registration.status(), Ongoing);
        assert_eq!(result.registration.terms().min_credit(), 6);
    }

    #[tokio::test]
    async fn rejects_empty_update() {
        let fx = Fixture::new();
        let registration = registration_in(&fx, Upcoming).await;
        let handler = UpdateRegistrationHandler::new(fx.store());

        let err = handler
            .handle(UpdateRegistrationCommand {
                registration_id: *registration.id(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_registration_is_not_found() {
        let fx = Fixture::new();
        let handler = UpdateRegistrationHandler::new(fx.store());
        let id = RegistrationId::new();

        let err = handler
            .handle(UpdateRegistrationCommand::status(id, Ongoing))
            .await
            .unwrap_err();

        assert_eq!(err, RegistrationError::not_found(id));
    }
}
