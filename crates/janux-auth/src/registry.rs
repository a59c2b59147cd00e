//! Registry of shared authorization contexts.
//!
//! Contexts are built mutably, then handed to the registry, which freezes
//! them behind an [`Arc`]. Holders and bits refer to contexts by name and
//! resolve them here.
//!
//! ```text
//! AuthorizationContext (mutable, being built)
//!          │ register
//!          ▼
//! ContextRegistry ── get("PERSON") ──► Arc<AuthorizationContext> (read-only)
//!                                            ▲
//!                      AuthorizationHolder ──┘ (one Arc per granted context)
//! ```

use crate::config::AuthConfig;
use crate::context::AuthorizationContext;
use crate::error::AuthError;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Name-keyed, insertion-ordered set of frozen contexts.
///
/// # Example
///
/// ```
/// use janux_auth::{AuthorizationContext, ContextRegistry};
///
/// let mut registry = ContextRegistry::new();
/// registry
///     .register(AuthorizationContext::with_bits("PERSON", "Person", ["READ"]).unwrap())
///     .unwrap();
///
/// assert!(registry.get("PERSON").is_some());
/// assert!(registry.get("ACCOUNT").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextRegistry {
    contexts: IndexMap<String, Arc<AuthorizationContext>>,
}

impl ContextRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every context described in a permission catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`AuthError`] raised while building a context or
    /// registering it.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let mut registry = Self::new();
        for def in &config.contexts {
            registry.register(def.build(config.max_bits)?)?;
        }
        Ok(registry)
    }

    /// Freezes and stores a context.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateName`] if a context with the same name
    /// is already registered.
    pub fn register(
        &mut self,
        context: AuthorizationContext,
    ) -> Result<Arc<AuthorizationContext>, AuthError> {
        let name = context.name().to_string();
        if self.contexts.contains_key(&name) {
            return Err(AuthError::DuplicateName {
                kind: "context",
                name,
                owner: "the registry".to_string(),
            });
        }

        debug!(context = %name, bits = context.len(), "Registered authorization context");
        let context = Arc::new(context);
        self.contexts.insert(name, Arc::clone(&context));
        Ok(context)
    }

    /// Looks up a context by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<AuthorizationContext>> {
        self.contexts.get(name)
    }

    /// Returns `true` if a context with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    /// Contexts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AuthorizationContext>> + '_ {
        self.contexts.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.contexts.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
