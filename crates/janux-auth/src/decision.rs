//! Outcome of a permission check.
//!
//! [`AuthorizationHolder::evaluate`](crate::AuthorizationHolder::evaluate)
//! returns a [`Decision`] that says *why* access was denied.
//! [`has_permissions`](crate::AuthorizationHolder::has_permissions) folds it
//! into a plain `bool`.
//!
//! ```text
//! evaluate(names, ctx)
//!     ├── almighty ─────────────────────► Granted
//!     ├── no grant for ctx ─────────────► Denied(NoGrant)
//!     ├── name not in ctx ──────────────► Denied(UnknownPermission)   (+ warn!)
//!     ├── required & !grant != 0 ───────► Denied(MissingBits)
//!     └── otherwise ────────────────────► Granted
//! ```

use janux_types::Bitmask;
use std::fmt;

/// Why a check was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The holder has no grant in the context.
    NoGrant {
        /// Context that was checked.
        context: String,
    },
    /// A requested permission is not defined in the context.
    UnknownPermission {
        /// Context that was checked.
        context: String,
        /// The unknown name.
        permission: String,
    },
    /// Some requested bits are not granted.
    MissingBits {
        /// Context that was checked.
        context: String,
        /// Requested bits absent from the grant.
        missing: Bitmask,
    },
}

impl DenialReason {
    /// The context named in the reason.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::NoGrant { context }
            | Self::UnknownPermission { context, .. }
            | Self::MissingBits { context, .. } => context,
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGrant { context } => write!(f, "no permissions granted in context '{context}'"),
            Self::UnknownPermission {
                context,
                permission,
            } => write!(
                f,
                "permission '{permission}' does not exist in context '{context}'"
            ),
            Self::MissingBits { context, missing } => {
                write!(f, "missing bits {missing:#b} in context '{context}'")
            }
        }
    }
}

/// Result of a permission check.
///
/// # Example
///
/// ```
/// use janux_auth::{AuthorizationContext, AuthorizationHolder, DenialReason};
/// use std::sync::Arc;
///
/// let person = Arc::new(
///     AuthorizationContext::with_bits("PERSON", "Person", ["READ", "UPDATE"]).unwrap(),
/// );
/// let mut holder = AuthorizationHolder::new("clerk");
/// holder.grant(["READ"], &person).unwrap();
///
/// assert!(holder.evaluate(["READ"], "PERSON").is_granted());
///
/// let denied = holder.evaluate(["UPDATE"], "PERSON");
/// assert_eq!(
///     denied.reason(),
///     Some(&DenialReason::MissingBits { context: "PERSON".into(), missing: 2 })
/// );
/// assert_eq!(denied.status_str(), "denied");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Every requested permission is held.
    Granted,
    /// At least one requested permission is not held.
    Denied(DenialReason),
}

impl Decision {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    /// The denial reason, or `None` when granted.
    #[must_use]
    pub fn reason(&self) -> Option<&DenialReason> {
        match self {
            Self::Granted => None,
            Self::Denied(reason) => Some(reason),
        }
    }

    /// Returns "granted" or "denied".
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied(_) => "denied",
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_granted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_helpers() {
        let d = Decision::Granted;
        assert!(d.is_granted());
        assert!(!d.is_denied());
        assert!(d.reason().is_none());
        assert_eq!(d.status_str(), "granted");
        assert!(bool::from(d));
    }

    #[test]
    fn denied_helpers() {
        let d = Decision::Denied(DenialReason::NoGrant {
            context: "PERSON".into(),
        });
        assert!(d.is_denied());
        assert_eq!(d.reason().map(DenialReason::context), Some("PERSON"));
        assert_eq!(d.status_str(), "denied");
        assert!(!bool::from(d));
    }

    #[test]
    fn reason_display() {
        let missing = DenialReason::MissingBits {
            context: "PERSON".into(),
            missing: 0b10,
        };
        assert_eq!(missing.to_string(), "missing bits 0b10 in context 'PERSON'");

        let unknown = DenialReason::UnknownPermission {
            context: "PERSON".into(),
            permission: "FLY".into(),
        };
        assert!(unknown.to_string().contains("FLY"));
    }
}
