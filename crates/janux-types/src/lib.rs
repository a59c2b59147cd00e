//! Core types for janux authorization.
//!
//! This crate holds the small, dependency-light vocabulary shared by the
//! permission engine and anything that stores or displays its data.
//!
//! # Crate Architecture
//!
//! ```text
//! janux-types  (names, Bitmask, ErrorCode)   ◄── THIS CRATE
//!      ↑
//! janux-auth   (AuthorizationContext, AuthorizationHolder, config)
//!      ↑
//! role / account storage (external collaborators)
//! ```
//!
//! # Example
//!
//! ```
//! use janux_types::{bit_value, max_value, BitName, ContextName, TryNew};
//!
//! let context = ContextName::try_new("PERSON".to_string()).unwrap();
//! let read = BitName::try_new("READ".to_string()).unwrap();
//! assert_eq!(context.as_str(), "PERSON");
//! assert_eq!(read.as_str(), "READ");
//!
//! // READ at position 0, UPDATE at position 1
//! assert_eq!(bit_value(0).unwrap() | bit_value(1).unwrap(), max_value(2));
//! ```

mod bitmask;
mod construct;
mod error;
mod name;

pub use bitmask::{bit_value, max_value, set_positions, Bitmask, MAX_PERMISSION_BITS};
pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use name::{BitName, ContextName, NameError};
