//! State machine trait for status enums.
//!
//! Transition rules live in an adjacency table owned by each status type;
//! validity is a lookup in that table rather than scattered conditionals.

use std::fmt;
use thiserror::Error;

/// A requested transition that does not follow an allowed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot transition from {from} to {to}")]
pub struct InvalidTransition<S: fmt::Display + fmt::Debug> {
    pub from: S,
    pub to: S,
}

/// Trait for status enums that represent state machines.
///
/// Implementors provide the adjacency table through `valid_transitions`;
/// validation and terminal detection come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for RegistrationStatus {
///     fn valid_transitions(&self) -> &'static [Self] {
///         match self {
///             Upcoming => &[Ongoing],
///             Ongoing => &[Ended],
///             Ended => &[],
///         }
///     }
/// }
///
/// let next = RegistrationStatus::Upcoming.transition_to(RegistrationStatus::Ongoing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug + fmt::Display + 'static {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> &'static [Self];

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, InvalidTransition<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
