//! JSON wire forms.
//!
//! Field names are part of the exchange contract and use camelCase.
//!
//! | Type | Shape |
//! |------|-------|
//! | [`ContextJson`] | `{name, description, enabled, sortOrder, bit: {NAME: {position, label, description, sortOrder}}}` |
//! | [`ContextShortJson`] | `{name, bit: {NAME: {position}}}` |
//! | [`HolderJson`] | `{name, roles?, permissions: {CTX: {grant, deny?}}, authContexts: [short form]}` |
//!
//! Bit maps are [`IndexMap`]s so key order survives a round trip; bit
//! positions are reassigned from the explicit `position` field regardless.

use indexmap::IndexMap;
use janux_types::Bitmask;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Full serialized form of an authorization context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextJson {
    /// Context name.
    pub name: String,
    /// Context description.
    #[serde(default)]
    pub description: String,
    /// Whether the context is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display sort order.
    #[serde(default)]
    pub sort_order: i64,
    /// Bits keyed by name, in registration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bit: IndexMap<String, BitJson>,
}

/// Full serialized form of a permission bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitJson {
    /// Bit position.
    pub position: u32,
    /// Display label. Ignored on input: the label always mirrors the name.
    #[serde(default)]
    pub label: String,
    /// Bit description.
    #[serde(default)]
    pub description: String,
    /// Display sort order; defaults to the position when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

/// Short serialized form of an authorization context.
///
/// Lossy: only identity and positions are kept, so it cannot rebuild a
/// context on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextShortJson {
    /// Context name.
    pub name: String,
    /// Bit positions keyed by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bit: IndexMap<String, BitShortJson>,
}

/// Short serialized form of a permission bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitShortJson {
    /// Bit position.
    pub position: u32,
}

/// Per-context grant entry in a serialized holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantJson {
    /// Granted bitmask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant: Option<Bitmask>,
    /// Reserved for revocation of inherited permissions. Never populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<Bitmask>,
}

/// Serialized form of an authorization holder.
///
/// The almighty flag is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderJson {
    /// Holder name.
    pub name: String,
    /// Role names, flat.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Grants keyed by context name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permissions: IndexMap<String, GrantJson>,
    /// Short form of every context referenced in `permissions`, same order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auth_contexts: Vec<ContextShortJson>,
}
