//! RegistrationStatus enum for the lifecycle of a semester registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a semester registration.
///
/// `UPCOMING → ONGOING → ENDED`, forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    #[default]
    Upcoming,
    Ongoing,
    Ended,
}

impl RegistrationStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [RegistrationStatus; 3] = [
        RegistrationStatus::Upcoming,
        RegistrationStatus::Ongoing,
        RegistrationStatus::Ended,
    ];

    /// Returns true while the registration counts against the
    /// single-active-registration invariant.
    pub fn is_active(&self) -> bool {
        matches!(self, RegistrationStatus::Upcoming | RegistrationStatus::Ongoing)
    }

    /// Returns true if non-status fields (and dependent offerings) may change.
    pub fn is_mutable(&self) -> bool {
        matches!(self, RegistrationStatus::Upcoming)
    }

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Upcoming => "UPCOMING",
            RegistrationStatus::Ongoing => "ONGOING",
            RegistrationStatus::Ended => "ENDED",
        }
    }
}

impl StateMachine for RegistrationStatus {
    fn valid_transitions(&self) -> &'static [Self] {
        use RegistrationStatus::*;
        match self {
            Upcoming => &[Ongoing],
            Ongoing => &[Ended],
            Ended => &[],
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPCOMING" => Ok(RegistrationStatus::Upcoming),
            "ONGOING" => Ok(RegistrationStatus::Ongoing),
            "ENDED" => Ok(RegistrationStatus::Ended),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown registration status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_upcoming() {
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Upcoming);
    }

    #[test]
    fn upcoming_only_moves_to_ongoing() {
        use RegistrationStatus::*;
        assert!(Upcoming.can_transition_to(&Ongoing));
        assert!(!Upcoming.can_transition_to(&Ended));
        assert!(!Upcoming.can_transition_to(&Upcoming));
    }

    #[test]
    fn ongoing_only_moves_to_ended() {
        use RegistrationStatus::*;
        assert!(Ongoing.can_transition_to(&Ended));
        assert!(!Ongoing.can_transition_to(&Upcoming));
        assert!(!Ongoing.can_transition_to(&Ongoing));
    }

    #[test]
    fn ended_is_terminal() {
        assert!(RegistrationStatus::Ended.is_terminal());
        for target in RegistrationStatus::ALL {
            assert!(RegistrationStatus::Ended.transition_to(target).is_err());
        }
    }

    #[test]
    fn active_and_mutable_flags() {
        use RegistrationStatus::*;
        assert!(Upcoming.is_active() && Ongoing.is_active());
        assert!(!Ended.is_active());
        assert!(Upcoming.is_mutable());
        assert!(!Ongoing.is_mutable());
        assert!(!Ended.is_mutable());
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&RegistrationStatus::Ongoing).unwrap(),
            "\"ONGOING\""
        );
        let status: RegistrationStatus = serde_json::from_str("\"ENDED\"").unwrap();
        assert_eq!(status, RegistrationStatus::Ended);
    }

    #[test]
    fn parses_storage_representation() {
        for status in RegistrationStatus::ALL {
            assert_eq!(status.as_str().parse::<RegistrationStatus>().unwrap(), status);
        }
        assert!("PAUSED".parse::<RegistrationStatus>().is_err());
    }
}
