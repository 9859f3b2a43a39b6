//! Opaque identifiers for users and downloadable resources.
//!
//! Both identifiers are free-form strings owned by other systems. The only
//! constraints enforced here are that they are non-blank and carry no
//! surrounding whitespace, so they can be embedded in cache keys and URL
//! paths without further escaping rules leaking into callers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned when constructing an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    /// Identifier carries leading or trailing whitespace.
    #[error("{kind} must not contain surrounding whitespace")]
    ContainsWhitespace { kind: &'static str },
}

fn validate(kind: &'static str, raw: &str) -> Result<(), IdentifierValidationError> {
    if raw.trim().is_empty() {
        return Err(IdentifierValidationError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdentifierValidationError::ContainsWhitespace { kind });
    }
    Ok(())
}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentifierValidationError> {
                let raw = value.into();
                validate($kind, &raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

string_identifier!(
    /// Identifier of the user whose downloads are being counted.
    UserId,
    "user id"
);

string_identifier!(
    /// Identifier of a downloadable resource.
    ResourceId,
    "resource id"
);
