//! Bitmask representation of permission sets.
//!
//! A permission bit at position `p` contributes `2^p` to a grant. Any subset
//! of a context's bits therefore collapses into one integer that can be
//! compared with a single AND.
//!
//! ```text
//! READ   (pos 0) ─┐
//! UPDATE (pos 1) ─┼─►  0b0000_0011 = 3
//! DELETE (pos 2)  │    (DELETE not granted)
//! ```
//!
//! The representation is a `u64`, so a context can hold at most
//! [`MAX_PERMISSION_BITS`] bits. Contexts may impose a lower limit, e.g. 31
//! bits for consumers that read grants as 32-bit signed integers.

/// Integer bitmask of granted or required permissions.
pub type Bitmask = u64;

/// Hard ceiling on the number of bits in one context.
pub const MAX_PERMISSION_BITS: u32 = Bitmask::BITS;

/// Returns `2^position`, or `None` when the position does not fit.
///
/// # Example
///
/// ```
/// use janux_types::bit_value;
///
/// assert_eq!(bit_value(0), Some(1));
/// assert_eq!(bit_value(3), Some(8));
/// assert_eq!(bit_value(64), None);
/// ```
#[must_use]
pub fn bit_value(position: u32) -> Option<Bitmask> {
    if position >= MAX_PERMISSION_BITS {
        return None;
    }
    Some(1 << position)
}

/// Returns `2^bit_count - 1`, the mask with every bit of a context set.
///
/// Saturates at `Bitmask::MAX` for a full 64-bit context instead of
/// overflowing.
///
/// # Example
///
/// ```
/// use janux_types::max_value;
///
/// assert_eq!(max_value(0), 0);
/// assert_eq!(max_value(2), 3);
/// assert_eq!(max_value(64), u64::MAX);
/// ```
#[must_use]
pub fn max_value(bit_count: u32) -> Bitmask {
    if bit_count >= MAX_PERMISSION_BITS {
        Bitmask::MAX
    } else {
        (1 << bit_count) - 1
    }
}

/// Iterates the positions of the set bits in `mask`, lowest first.
pub fn set_positions(mask: Bitmask) -> impl Iterator<Item = u32> {
    (0..MAX_PERMISSION_BITS).filter(move |p| mask & (1 << p) != 0)
}
