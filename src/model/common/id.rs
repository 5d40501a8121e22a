use std::convert::Infallible;
use std::fmt::{Display, Formatter};

use rocket::request::FromParam;
use serde::{Deserialize, Serialize};

/// Define an opaque string identifier newtype.
///
/// Identifiers are compared byte-for-byte; the stores never interpret them.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Is this identifier empty once surrounding whitespace is removed?
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'a> FromParam<'a> for $name {
            type Error = Infallible;

            fn from_param(param: &'a str) -> Result<Self, Self::Error> {
                Ok(Self::from(param))
            }
        }
    };
}

opaque_id!(
    /// Primary key of a voter record. Not the public login identifier.
    VoterId
);
opaque_id!(CandidateId);
opaque_id!(BallotId);
opaque_id!(ElectionId);
