//! Permission bits.
//!
//! A bit starts life as a detached [`BitDefinition`] and becomes a
//! [`PermissionBit`] when an [`AuthorizationContext`](crate::AuthorizationContext)
//! registers it. Registration fixes the position; it never changes after that.
//!
//! ```text
//! BitDefinition { position: None }      ─┐
//!                                        ├─ add_permission_bit ─► PermissionBit { position: p }
//! BitDefinition { position: Some(p) }   ─┘   (auto: max + 1)        (owned by one context)
//! ```

use janux_types::{bit_value, BitName, Bitmask, ContextName};

/// A permission bit that has not been registered yet.
///
/// The position is normally left unset so the context assigns the next free
/// one. An explicit position is only used when rebuilding a context from
/// its serialized form.
///
/// # Example
///
/// ```
/// use janux_auth::BitDefinition;
/// use janux_types::{BitName, TryNew};
///
/// let read = BitDefinition::new(BitName::try_new("READ".into()).unwrap(), "Read a person")
///     .with_sort_order(10);
/// assert_eq!(read.name().as_str(), "READ");
/// assert_eq!(read.position(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitDefinition {
    pub(crate) name: BitName,
    pub(crate) description: String,
    pub(crate) sort_order: Option<i64>,
    pub(crate) position: Option<u32>,
}

impl BitDefinition {
    /// Creates a detached bit with no position and no sort order.
    #[must_use]
    pub fn new(name: BitName, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
            sort_order: None,
            position: None,
        }
    }

    /// Sets the display sort order. Defaults to the assigned position.
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Pins the bit to an explicit position.
    #[must_use]
    pub fn at_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// The bit name.
    #[must_use]
    pub fn name(&self) -> &BitName {
        &self.name
    }

    /// The explicit position, if any.
    #[must_use]
    pub fn position(&self) -> Option<u32> {
        self.position
    }
}

/// A named flag registered in an authorization context.
///
/// Instances are only created by the owning context, so every field is
/// read-only from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionBit {
    pub(crate) name: BitName,
    pub(crate) label: String,
    pub(crate) description: String,
    pub(crate) position: u32,
    pub(crate) sort_order: i64,
    pub(crate) context: ContextName,
}

impl PermissionBit {
    /// The bit name, unique within its context.
    #[must_use]
    pub fn name(&self) -> &BitName {
        &self.name
    }

    /// Display label. Always equal to the name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Bit position, assigned once at registration.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Display sort order.
    #[must_use]
    pub fn sort_order(&self) -> i64 {
        self.sort_order
    }

    /// Name of the context this bit belongs to.
    #[must_use]
    pub fn context(&self) -> &ContextName {
        &self.context
    }

    /// The bit's numeric value, `2^position`.
    #[must_use]
    pub fn value(&self) -> Bitmask {
        // position < bit limit <= 64, enforced at registration
        bit_value(self.position).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janux_types::TryNew;

    fn name(s: &str) -> BitName {
        BitName::try_new(s.to_string()).expect("valid bit name")
    }

    #[test]
    fn definition_defaults_are_unset() {
        let def = BitDefinition::new(name("READ"), "Read");
        assert_eq!(def.position(), None);
        assert_eq!(def.sort_order, None);
        assert_eq!(def.description, "Read");
    }

    #[test]
    fn definition_builders() {
        let def = BitDefinition::new(name("UPDATE"), "")
            .with_sort_order(99)
            .at_position(1);
        assert_eq!(def.position(), Some(1));
        assert_eq!(def.sort_order, Some(99));
    }

    #[test]
    fn registered_bit_value_is_power_of_two() {
        let bit = PermissionBit {
            name: name("DELETE"),
            label: "DELETE".into(),
            description: String::new(),
            position: 5,
            sort_order: 5,
            context: ContextName::try_new("PERSON".into()).expect("valid context name"),
        };
        assert_eq!(bit.value(), 32);
        assert_eq!(Some(bit.value()), bit_value(5));
        assert_eq!(bit.context().as_str(), "PERSON");
    }
}
