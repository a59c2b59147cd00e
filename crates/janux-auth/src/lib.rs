//! Bit-indexed permission model for janux.
//!
//! An [`AuthorizationContext`] names a business entity (`PERSON`,
//! `ACCOUNT`, ...) and the actions on it, each at one bit position. An
//! [`AuthorizationHolder`] (a role or an account) keeps one bitmask per
//! context and answers "may I do X on Y?" by masking.
//!
//! # Crate Architecture
//!
//! ```text
//! janux-types  (ContextName, BitName, Bitmask, ErrorCode)
//!      ↑
//! janux-auth   ◄── THIS CRATE
//!   ├── context   AuthorizationContext, PermissionBit
//!   ├── holder    AuthorizationHolder, grants and checks
//!   ├── decision  Decision / DenialReason
//!   ├── registry  ContextRegistry (shared, frozen contexts)
//!   ├── wire      JSON forms
//!   └── config    TOML permission catalog
//! ```
//!
//! # Example
//!
//! ```
//! use janux_auth::{AuthorizationContext, AuthorizationHolder, ContextRegistry};
//!
//! let mut registry = ContextRegistry::new();
//! let person = registry
//!     .register(AuthorizationContext::with_bits(
//!         "PERSON",
//!         "Person",
//!         ["READ", "UPDATE", "DELETE", "PURGE"],
//!     )?)?;
//!
//! let mut admin = AuthorizationHolder::new("ADMIN");
//! admin.grant(["READ", "UPDATE", "DELETE"], &person)?;
//!
//! assert_eq!(admin.granted("PERSON"), Some(7));
//! assert!(admin.can(["READ", "DELETE"], "PERSON"));
//! assert!(!admin.can("PURGE", "PERSON"));
//! # Ok::<(), janux_auth::AuthError>(())
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: checks return `false` for unknown contexts and names
//! - **Zero is absence**: a zero grant removes the context from the holder
//! - **Contexts are shared**: holders keep an `Arc` to the context, never a copy

pub mod bit;
pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod holder;
pub mod registry;
pub mod wire;

pub use bit::{BitDefinition, PermissionBit};
pub use context::{default_bit_description, AuthorizationContext};
pub use decision::{Decision, DenialReason};
pub use error::AuthError;
pub use holder::{AuthorizationHolder, PermissionQuery, PermissionSet};
pub use registry::ContextRegistry;
pub use wire::{BitJson, BitShortJson, ContextJson, ContextShortJson, GrantJson, HolderJson};

// Re-export the shared vocabulary for convenience
pub use janux_types::{BitName, Bitmask, ContextName, ErrorCode, MAX_PERMISSION_BITS};
