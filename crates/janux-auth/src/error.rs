//! Error type for context registration and grant operations.
//!
//! ```text
//! AuthorizationContext::add_permission_bit ── InvalidArgument | DuplicateName
//!                                             DuplicatePosition | CapacityExceeded
//! AuthorizationContext::from_json ─────────── NonContiguousPositions (+ the above)
//! AuthorizationContext::permission_as_number  UnknownPermission
//! AuthorizationHolder::grant ──────────────── UnknownPermission | BitmaskOverflow
//! AuthorizationHolder::grant_by_name ──────── MissingContext
//! ```
//!
//! Every variant aborts the operation before anything is mutated. Permission
//! *checks* never return these errors: an unknown name during a check is
//! folded into a denied [`Decision`](crate::Decision).

use janux_types::{Bitmask, ErrorCode, NameError};
use thiserror::Error;

/// Errors raised by the authorization core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A name or limit argument failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A bit or context with this name is already registered.
    #[error("a {kind} named '{name}' already exists in {owner}")]
    DuplicateName {
        /// "permission bit" or "context".
        kind: &'static str,
        /// The conflicting name.
        name: String,
        /// Owning context, or "the registry" for duplicate contexts.
        owner: String,
    },

    /// An explicit bit position is already taken in the context.
    #[error("position {position} is already used by '{existing}' in context '{context}'")]
    DuplicatePosition {
        /// Context being populated.
        context: String,
        /// Requested position.
        position: u32,
        /// Name of the bit already holding that position.
        existing: String,
    },

    /// Deserialized bit positions do not form the sequence `0..count`.
    #[error("bit positions in context '{context}' must be exactly 0..{count}")]
    NonContiguousPositions {
        /// Context being deserialized.
        context: String,
        /// Number of bits in the context.
        count: usize,
    },

    /// A permission name is not registered in the context.
    #[error("cannot convert permission '{permission}' to number: it does not exist in context '{context}'")]
    UnknownPermission {
        /// Context that was consulted.
        context: String,
        /// The unknown permission name.
        permission: String,
    },

    /// A grant value has bits outside the context's range.
    #[error("permission bitmask {value} exceeds the maximum {max} of context '{context}' (holder '{holder}')")]
    BitmaskOverflow {
        /// Context the grant targets.
        context: String,
        /// Holder receiving the grant.
        holder: String,
        /// The rejected value.
        value: Bitmask,
        /// The context's maximum value.
        max: Bitmask,
    },

    /// Adding another bit would exceed the context's bit limit.
    #[error("context '{context}' cannot hold more than {limit} permission bits")]
    CapacityExceeded {
        /// Context being populated.
        context: String,
        /// The context's bit limit.
        limit: u32,
    },

    /// No context with this name is available.
    #[error("no authorization context named '{context}' (holder '{holder}')")]
    MissingContext {
        /// Requested context name.
        context: String,
        /// Holder the operation was for.
        holder: String,
    },
}

impl From<NameError> for AuthError {
    fn from(err: NameError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "AUTH_INVALID_ARGUMENT",
            Self::DuplicateName { .. } => "AUTH_DUPLICATE_NAME",
            Self::DuplicatePosition { .. } => "AUTH_DUPLICATE_POSITION",
            Self::NonContiguousPositions { .. } => "AUTH_NON_CONTIGUOUS_POSITIONS",
            Self::UnknownPermission { .. } => "AUTH_UNKNOWN_PERMISSION",
            Self::BitmaskOverflow { .. } => "AUTH_BITMASK_OVERFLOW",
            Self::CapacityExceeded { .. } => "AUTH_CAPACITY_EXCEEDED",
            Self::MissingContext { .. } => "AUTH_MISSING_CONTEXT",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
