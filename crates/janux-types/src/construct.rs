//! Fallible construction.
//!
//! Types whose invariants must be checked at construction time implement
//! [`TryNew`] instead of exposing an infallible `new()`. The `try_` prefix
//! keeps the fallibility visible at every call site.
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds |
//! | [`TryNew`] | Construction validates its input |
//! | `TryFrom<T>` | Converting from another type |

/// Trait for constructors that validate their arguments.
///
/// `Args` may be a tuple when several values are needed.
///
/// # Example
///
/// ```
/// use janux_types::TryNew;
///
/// struct SortKey(i64);
///
/// #[derive(Debug, PartialEq)]
/// struct NegativeKey;
///
/// impl TryNew for SortKey {
///     type Error = NegativeKey;
///     type Args = i64;
///
///     fn try_new(value: i64) -> Result<Self, Self::Error> {
///         if value < 0 {
///             return Err(NegativeKey);
///         }
///         Ok(SortKey(value))
///     }
/// }
///
/// assert!(SortKey::try_new(3).is_ok());
/// assert_eq!(SortKey::try_new(-1).err(), Some(NegativeKey));
/// ```
pub trait TryNew: Sized {
    /// Error returned when validation fails.
    type Error;

    /// Construction arguments.
    type Args;

    /// Validates `args` and constructs `Self`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when an invariant does not hold.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>;
}
