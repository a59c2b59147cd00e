//! Machine-readable error codes shared by janux crates.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so callers can
//! branch on a stable string instead of matching on `Display` output.
//!
//! # Example
//!
//! ```
//! use janux_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum CatalogError {
//!     Missing(String),
//!     Locked,
//! }
//!
//! impl ErrorCode for CatalogError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing(_) => "CATALOG_MISSING",
//!             Self::Locked => "CATALOG_LOCKED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Locked)
//!     }
//! }
//!
//! let err = CatalogError::Missing("PERSON".into());
//! assert_eq!(err.code(), "CATALOG_MISSING");
//! assert!(!err.is_recoverable());
//! ```

/// Stable error code interface.
///
/// # Code Format
///
/// - UPPER_SNAKE_CASE, e.g. `"AUTH_DUPLICATE_NAME"`
/// - Prefixed by the owning crate's domain (`AUTH_`, `CONFIG_`, `NAME_`)
/// - Part of the public contract: renaming a code is a breaking change
///
/// # Recoverability
///
/// Almost every authorization error is a programmer or configuration error
/// that will fail identically on retry. Only report `true` when a retry or
/// a user action can plausibly change the outcome.
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying or correcting input may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code is non-empty, carries `expected_prefix` and
/// is UPPER_SNAKE_CASE.
///
/// Intended for tests that pin down every variant of an error enum.
///
/// # Panics
///
/// Panics with a descriptive message when any check fails.
///
/// # Example
///
/// ```
/// use janux_types::{assert_error_code, ErrorCode};
///
/// struct Denied;
///
/// impl ErrorCode for Denied {
///     fn code(&self) -> &'static str { "AUTH_DENIED" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Denied, "AUTH_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Runs [`assert_error_code`] over a slice of errors.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
