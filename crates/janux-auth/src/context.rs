//! Authorization contexts: named registries of permission bits.
//!
//! A context defines the universe of permissions that can be granted on one
//! kind of resource (e.g. `PERSON`). It assigns each bit a stable position
//! and converts between permission names and bitmasks.
//!
//! # Invariants
//!
//! - Bit names are unique within a context.
//! - Auto-assigned positions are contiguous from 0.
//! - Every position is below the context's bit limit (at most 64).
//! - Bits are never removed and positions never change.
//!
//! # Example
//!
//! ```
//! use janux_auth::AuthorizationContext;
//!
//! let person = AuthorizationContext::with_bits("PERSON", "Person entity", ["READ", "UPDATE"])
//!     .unwrap();
//!
//! assert_eq!(person.max_value(), 3);
//! assert_eq!(person.permission_as_number("UPDATE").unwrap(), 2);
//! assert_eq!(person.permissions_as_number(["READ", "UPDATE"]).unwrap(), 3);
//! assert_eq!(person.names_for_mask(2), vec!["UPDATE"]);
//! ```

use crate::bit::{BitDefinition, PermissionBit};
use crate::error::AuthError;
use crate::wire::{BitJson, BitShortJson, ContextJson, ContextShortJson};
use indexmap::IndexMap;
use janux_types::{
    max_value, set_positions, BitName, Bitmask, ContextName, TryNew, MAX_PERMISSION_BITS,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Description given to bits registered without one.
#[must_use]
pub fn default_bit_description(bit: &str, context_description: &str) -> String {
    format!("Grants permission to {bit} a {context_description}")
}

/// A named, ordered registry of permission bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    name: ContextName,
    description: String,
    sort_order: i64,
    enabled: bool,
    /// Bits by name, in registration order.
    bits: IndexMap<BitName, PermissionBit>,
    /// Bit names by position.
    by_position: BTreeMap<u32, BitName>,
    bit_limit: u32,
}

impl AuthorizationContext {
    /// Creates an empty, enabled context.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidArgument`] if `name` is empty.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, AuthError> {
        Ok(Self {
            name: ContextName::try_new(name.into())?,
            description: description.into(),
            sort_order: 0,
            enabled: true,
            bits: IndexMap::new(),
            by_position: BTreeMap::new(),
            bit_limit: MAX_PERMISSION_BITS,
        })
    }

    /// Creates a context and registers `bit_names` in order, each with a
    /// generated description.
    ///
    /// # Errors
    ///
    /// Fails like [`new`](Self::new) and
    /// [`add_permission_bit`](Self::add_permission_bit).
    pub fn with_bits<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        bit_names: I,
    ) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ctx = Self::new(name, description)?;
        for bit in bit_names {
            let bit = bit.as_ref();
            let description = default_bit_description(bit, &ctx.description);
            ctx.add_permission_bit_by_name(bit, description, None)?;
        }
        Ok(ctx)
    }

    /// Context name.
    #[must_use]
    pub fn name(&self) -> &ContextName {
        &self.name
    }

    /// Context description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Display sort order.
    #[must_use]
    pub fn sort_order(&self) -> i64 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: i64) {
        self.sort_order = sort_order;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Maximum number of bits this context accepts.
    #[must_use]
    pub fn bit_limit(&self) -> u32 {
        self.bit_limit
    }

    /// Lowers or raises the bit limit.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidArgument`] if `limit` is 0 or above 64.
    /// - [`AuthError::CapacityExceeded`] if a registered bit already sits at
    ///   or beyond `limit`.
    pub fn set_bit_limit(&mut self, limit: u32) -> Result<(), AuthError> {
        if limit == 0 || limit > MAX_PERMISSION_BITS {
            return Err(AuthError::InvalidArgument(format!(
                "bit limit must be between 1 and {MAX_PERMISSION_BITS}, got {limit}"
            )));
        }
        if self.max_bit_position().is_some_and(|max| max >= limit) {
            return Err(AuthError::CapacityExceeded {
                context: self.name.to_string(),
                limit,
            });
        }
        self.bit_limit = limit;
        Ok(())
    }

    /// Registers a permission bit.
    ///
    /// A bit without a position gets `highest position + 1` (0 for the first
    /// bit). An explicit position is kept as-is. The label is set to the
    /// name, and an unset sort order defaults to the position.
    ///
    /// The context is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`AuthError::DuplicateName`] if the name is already registered.
    /// - [`AuthError::DuplicatePosition`] if the explicit position is taken.
    /// - [`AuthError::CapacityExceeded`] if the position would reach the bit limit.
    pub fn add_permission_bit(&mut self, def: BitDefinition) -> Result<&PermissionBit, AuthError> {
        let BitDefinition {
            name,
            description,
            sort_order,
            position,
        } = def;

        if self.bits.contains_key(name.as_str()) {
            return Err(AuthError::DuplicateName {
                kind: "permission bit",
                name: name.into_inner(),
                owner: format!("context '{}'", self.name),
            });
        }

        let position = match position {
            Some(p) => {
                if let Some(existing) = self.by_position.get(&p) {
                    return Err(AuthError::DuplicatePosition {
                        context: self.name.to_string(),
                        position: p,
                        existing: existing.to_string(),
                    });
                }
                p
            }
            None => self.max_bit_position().map_or(0, |max| max + 1),
        };

        if position >= self.bit_limit {
            return Err(AuthError::CapacityExceeded {
                context: self.name.to_string(),
                limit: self.bit_limit,
            });
        }

        debug!(context = %self.name, bit = %name, position, "Registered permission bit");

        let bit = PermissionBit {
            label: name.to_string(),
            name: name.clone(),
            description,
            position,
            sort_order: sort_order.unwrap_or_else(|| i64::from(position)),
            context: self.name.clone(),
        };
        self.by_position.insert(position, name.clone());
        Ok(&*self.bits.entry(name).or_insert(bit))
    }

    /// Registers a bit from raw fields.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidArgument`] for an empty name, otherwise
    /// fails like [`add_permission_bit`](Self::add_permission_bit).
    pub fn add_permission_bit_by_name(
        &mut self,
        name: &str,
        description: impl Into<String>,
        sort_order: Option<i64>,
    ) -> Result<&PermissionBit, AuthError> {
        let mut def = BitDefinition::new(BitName::try_new(name.to_string())?, description);
        def.sort_order = sort_order;
        self.add_permission_bit(def)
    }

    /// Looks up a bit by name.
    #[must_use]
    pub fn permission_bit(&self, name: &str) -> Option<&PermissionBit> {
        self.bits.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bits.contains_key(name)
    }

    /// Number of registered bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in registration order.
    pub fn permission_bits(&self) -> impl Iterator<Item = &PermissionBit> + '_ {
        self.bits.values()
    }

    /// Bits ordered by position.
    pub fn permission_bits_by_position(&self) -> impl Iterator<Item = &PermissionBit> + '_ {
        self.by_position
            .values()
            .filter_map(|name| self.bits.get(name.as_str()))
    }

    /// Returns `2^position` of the named bit.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownPermission`] if no such bit exists.
    pub fn permission_as_number(&self, name: &str) -> Result<Bitmask, AuthError> {
        self.bits
            .get(name)
            .map(PermissionBit::value)
            .ok_or_else(|| self.unknown_permission(name))
    }

    /// Combines the named bits into one mask.
    ///
    /// Bits are OR-ed, so repeating a name does not change the result.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownPermission`] for the first unknown name.
    pub fn permissions_as_number<I, S>(&self, names: I) -> Result<Bitmask, AuthError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.mask_of(names)
            .map_err(|unknown| self.unknown_permission(&unknown))
    }

    /// Like [`permissions_as_number`](Self::permissions_as_number) but
    /// reports only the unknown name.
    pub(crate) fn mask_of<I, S>(&self, names: I) -> Result<Bitmask, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(0, |acc: Bitmask, name| {
            let name = name.as_ref();
            match self.bits.get(name) {
                Some(bit) => Ok(acc | bit.value()),
                None => Err(name.to_string()),
            }
        })
    }

    /// `2^(bit count) - 1`.
    #[must_use]
    pub fn max_value(&self) -> Bitmask {
        // bounded by bit_limit <= 64
        max_value(self.bits.len() as u32)
    }

    /// Names of the bits set in `mask`, lowest position first.
    ///
    /// Bits outside the context are ignored.
    #[must_use]
    pub fn names_for_mask(&self, mask: Bitmask) -> Vec<&str> {
        set_positions(mask)
            .filter_map(|p| self.by_position.get(&p))
            .map(BitName::as_str)
            .collect()
    }

    /// Full serialized form.
    #[must_use]
    pub fn to_json(&self) -> ContextJson {
        ContextJson {
            name: self.name.to_string(),
            description: self.description.clone(),
            enabled: self.enabled,
            sort_order: self.sort_order,
            bit: self
                .bits
                .values()
                .map(|bit| {
                    (
                        bit.name.to_string(),
                        BitJson {
                            position: bit.position,
                            label: bit.label.clone(),
                            description: bit.description.clone(),
                            sort_order: Some(bit.sort_order),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Short serialized form, for embedding in holder output.
    #[must_use]
    pub fn to_short_json(&self) -> ContextShortJson {
        ContextShortJson {
            name: self.name.to_string(),
            bit: self
                .bits
                .values()
                .map(|bit| {
                    (
                        bit.name.to_string(),
                        BitShortJson {
                            position: bit.position,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Rebuilds a context from its full form, keeping every explicit
    /// position.
    ///
    /// # Errors
    ///
    /// Fails like [`add_permission_bit`](Self::add_permission_bit), and with
    /// [`AuthError::NonContiguousPositions`] if the positions are not
    /// exactly `0..count`.
    pub fn from_json(json: ContextJson) -> Result<Self, AuthError> {
        Self::from_json_with_limit(json, MAX_PERMISSION_BITS)
    }

    /// Like [`from_json`](Self::from_json) with a custom bit limit.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json) and
    /// [`set_bit_limit`](Self::set_bit_limit).
    pub fn from_json_with_limit(json: ContextJson, limit: u32) -> Result<Self, AuthError> {
        let ContextJson {
            name,
            description,
            enabled,
            sort_order,
            bit,
        } = json;

        let mut ctx = Self::new(name, description)?;
        ctx.set_bit_limit(limit)?;
        ctx.enabled = enabled;
        ctx.sort_order = sort_order;

        for (bit_name, entry) in bit {
            let mut def = BitDefinition::new(BitName::try_new(bit_name)?, entry.description)
                .at_position(entry.position);
            def.sort_order = entry.sort_order;
            ctx.add_permission_bit(def)?;
        }

        ctx.check_contiguous()?;
        Ok(ctx)
    }

    fn check_contiguous(&self) -> Result<(), AuthError> {
        match self.max_bit_position() {
            Some(max) if max as usize + 1 != self.bits.len() => {
                Err(AuthError::NonContiguousPositions {
                    context: self.name.to_string(),
                    count: self.bits.len(),
                })
            }
            _ => Ok(()),
        }
    }

    fn max_bit_position(&self) -> Option<u32> {
        self.by_position.keys().next_back().copied()
    }

    fn unknown_permission(&self, name: &str) -> AuthError {
        AuthError::UnknownPermission {
            context: self.name.to_string(),
            permission: name.to_string(),
        }
    }
}

impl fmt::Display for AuthorizationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, (position, name)) in self.by_position.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={position}")?;
        }
        f.write_str("]")
    }
}

impl Serialize for AuthorizationContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AuthorizationContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = ContextJson::deserialize(deserializer)?;
        Self::from_json(json).map_err(serde::de::Error::custom)
    }
}
