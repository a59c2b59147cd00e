//! Validated names for authorization contexts and permission bits.
//!
//! Both names are plain non-empty strings on the wire. Wrapping them in
//! newtypes moves the "non-empty" check to construction so registries can
//! rely on it everywhere else.
//!
//! # Example
//!
//! ```
//! use janux_types::{BitName, ContextName, TryNew};
//!
//! let ctx = ContextName::try_new("PERSON".to_string()).unwrap();
//! assert_eq!(ctx.as_str(), "PERSON");
//!
//! assert!(BitName::try_new(String::new()).is_err());
//! ```

use crate::{ErrorCode, TryNew};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Error returned when a name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name was an empty string.
    #[error("{kind} name must be a non-empty string")]
    Empty {
        /// Which kind of name was rejected ("context" or "permission bit").
        kind: &'static str,
    },
}

impl ErrorCode for NameError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "NAME_EMPTY",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

macro_rules! validated_name {
    ($(#[$meta:meta])* $ty:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            /// Returns the name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the name, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl TryNew for $ty {
            type Error = NameError;
            type Args = String;

            fn try_new(value: String) -> Result<Self, Self::Error> {
                if value.is_empty() {
                    return Err(NameError::Empty { kind: $kind });
                }
                Ok(Self(value))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = NameError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_new(value)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = NameError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::try_new(value.to_string())
            }
        }

        impl From<$ty> for String {
            fn from(name: $ty) -> Self {
                name.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_name!(
    /// Unique identifier of an authorization context, e.g. `"PERSON"`.
    ContextName,
    "context"
);

validated_name!(
    /// Name of a permission bit, unique within its context, e.g. `"READ"`.
    BitName,
    "permission bit"
);
