//! # Record Identifiers
//!
//! Newtype wrappers for the opaque identifiers of the record model. These
//! prevent accidental identifier confusion: a `ClauseId` cannot be passed
//! where a `RegisterId` is expected, even though both are strings on disk.
//!
//! Identifiers are opaque. Fresh ones are random UUIDs, but anything the
//! persistence collaborator hands back is accepted verbatim.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing identifier string.
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Access the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

opaque_id!(
    /// Identifier of a register entry (a regulatory document).
    RegisterId,
    "register"
);

opaque_id!(
    /// Identifier of a matrix document (the assessment of one register entry).
    MatrixDocumentId,
    "matrix"
);

opaque_id!(
    /// Identifier of a clause within a matrix document.
    ClauseId,
    "clause"
);

opaque_id!(
    /// Identifier of a manual, process or form reference on a clause.
    ReferenceId,
    "ref"
);
