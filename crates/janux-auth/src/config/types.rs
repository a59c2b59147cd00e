//! Permission catalog types.
//!
//! [`AuthConfig::default`] is the compile-time fallback: no contexts and the
//! full 64-bit limit.

use crate::context::{default_bit_description, AuthorizationContext};
use crate::error::AuthError;
use janux_types::MAX_PERMISSION_BITS;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Permission catalog after merging all layers.
///
/// # Example
///
/// ```
/// use janux_auth::config::AuthConfig;
///
/// let config = AuthConfig::from_toml(r#"
/// max_bits = 31
///
/// [[contexts]]
/// name = "PERSON"
/// description = "Person"
/// bits = ["READ", { name = "UPDATE", sort_order = 9 }]
/// "#).unwrap();
///
/// assert_eq!(config.max_bits, 31);
/// assert_eq!(config.contexts[0].bits.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bit limit applied to every context built from this catalog.
    pub max_bits: u32,

    /// Context definitions, in declaration order.
    pub contexts: Vec<ContextConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_bits: MAX_PERMISSION_BITS,
            contexts: Vec::new(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the input is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serializes to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Looks up a context definition by name.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Merges a later layer into this one.
    ///
    /// `max_bits` is overridden whenever the layer sets it. A context in the
    /// layer replaces the same-named context here, or is appended.
    pub fn merge(&mut self, layer: &CatalogLayer) {
        if let Some(max_bits) = layer.max_bits {
            self.max_bits = max_bits;
        }

        for ctx in &layer.contexts {
            match self.contexts.iter_mut().find(|c| c.name == ctx.name) {
                Some(existing) => *existing = ctx.clone(),
                None => self.contexts.push(ctx.clone()),
            }
        }
    }
}

/// One catalog file, before merging.
///
/// An absent `max_bits` stays `None`, so a later file can restore the
/// full 64-bit limit by writing it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogLayer {
    pub max_bits: Option<u32>,
    pub contexts: Vec<ContextConfig>,
}

impl CatalogLayer {
    /// Deserializes from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the input is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Definition of one authorization context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub sort_order: i64,

    /// Bits, auto-positioned in order.
    #[serde(default)]
    pub bits: Vec<BitEntry>,
}

impl ContextConfig {
    /// Builds the context with the given bit limit.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] raised by context construction, the limit
    /// check, or bit registration.
    pub fn build(&self, max_bits: u32) -> Result<AuthorizationContext, AuthError> {
        let mut ctx = AuthorizationContext::new(self.name.as_str(), self.description.as_str())?;
        ctx.set_bit_limit(max_bits)?;
        ctx.set_enabled(self.enabled);
        ctx.set_sort_order(self.sort_order);

        for entry in &self.bits {
            let (name, description, sort_order) = match entry {
                BitEntry::Name(name) => (name.as_str(), None, None),
                BitEntry::Detailed(bit) => {
                    (bit.name.as_str(), bit.description.clone(), bit.sort_order)
                }
            };
            let description =
                description.unwrap_or_else(|| default_bit_description(name, &self.description));
            ctx.add_permission_bit_by_name(name, description, sort_order)?;
        }
        Ok(ctx)
    }
}

/// A bit in a context definition: a bare name or a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitEntry {
    Name(String),
    Detailed(BitConfig),
}

impl BitEntry {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed(bit) => &bit.name,
        }
    }
}

/// Bit definition with optional description and sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}
