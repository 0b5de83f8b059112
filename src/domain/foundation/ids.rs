//! Strongly-typed identifier value objects.
//!
//! Every aggregate and catalog record is addressed by a UUID wrapped in its
//! own newtype so that a `CourseId` can never be passed where a `FacultyId`
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Identifier of an academic semester (catalog record).
    SemesterId
);

uuid_id!(
    /// Identifier of a semester registration period.
    RegistrationId
);

uuid_id!(
    /// Identifier of an offered course section.
    OfferingId
);

uuid_id!(
    /// Identifier of an academic faculty (the organisational unit).
    AcademicFacultyId
);

uuid_id!(
    /// Identifier of an academic department.
    DepartmentId
);

uuid_id!(
    /// Identifier of a catalog course.
    CourseId
);

uuid_id!(
    /// Identifier of a faculty member who teaches offerings.
    FacultyId
);
