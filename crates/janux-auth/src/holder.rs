//! Grant holders: roles and accounts that accumulate permissions.
//!
//! An [`AuthorizationHolder`] stores, per context name, the granted bitmask
//! and a shared handle to the context that interprets it.
//!
//! # Grant lifecycle
//!
//! ```text
//!            grant(v > 0)            grant(v' > 0)
//! {absent} ───────────────► {v} ───────────────► {v'}
//!     ▲                                            │
//!     └──────────── grant(0) / revoke ─────────────┘
//! ```
//!
//! A zero grant is never stored. Checks never fail: unknown contexts and
//! unknown permission names both resolve to "denied".
//!
//! # Example
//!
//! ```
//! use janux_auth::{AuthorizationContext, AuthorizationHolder};
//! use std::sync::Arc;
//!
//! let person = Arc::new(
//!     AuthorizationContext::with_bits("PERSON", "Person", ["READ", "UPDATE"]).unwrap(),
//! );
//!
//! let mut clerk = AuthorizationHolder::new("clerk");
//! clerk.grant(1_u64, &person).unwrap();
//!
//! assert!(clerk.can("READ", "PERSON"));
//! assert!(!clerk.can("UPDATE", "PERSON"));
//! assert!(!clerk.can(["READ", "UPDATE"], "PERSON"));
//! ```

use crate::context::AuthorizationContext;
use crate::decision::{Decision, DenialReason};
use crate::error::AuthError;
use crate::registry::ContextRegistry;
use crate::wire::{GrantJson, HolderJson};
use indexmap::IndexMap;
use janux_types::Bitmask;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{debug, warn};

/// Permissions to grant: either names resolved through the context, or a
/// raw bitmask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionSet {
    /// Permission names.
    Names(Vec<String>),
    /// A precomputed bitmask.
    Mask(Bitmask),
}

impl From<Bitmask> for PermissionSet {
    fn from(mask: Bitmask) -> Self {
        Self::Mask(mask)
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for PermissionSet {
    fn from(names: Vec<&str>) -> Self {
        Self::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for PermissionSet {
    fn from(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|n| (*n).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PermissionSet {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.iter().map(|n| (*n).to_string()).collect())
    }
}

/// Argument to [`AuthorizationHolder::can`]: one name or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionQuery {
    /// A single permission name.
    One(String),
    /// All of these permission names.
    All(Vec<String>),
}

impl From<&str> for PermissionQuery {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for PermissionQuery {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for PermissionQuery {
    fn from(names: Vec<String>) -> Self {
        Self::All(names)
    }
}

impl From<Vec<&str>> for PermissionQuery {
    fn from(names: Vec<&str>) -> Self {
        Self::All(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for PermissionQuery {
    fn from(names: &[&str]) -> Self {
        Self::All(names.iter().map(|n| (*n).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PermissionQuery {
    fn from(names: [&str; N]) -> Self {
        Self::All(names.iter().map(|n| (*n).to_string()).collect())
    }
}

#[derive(Debug, Clone)]
struct GrantEntry {
    context: Arc<AuthorizationContext>,
    grant: Bitmask,
}

/// An entity that holds grants across contexts and answers checks.
///
/// Role and account types embed a holder and add their own fields.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationHolder {
    name: String,
    almighty: bool,
    roles: Vec<String>,
    grants: IndexMap<String, GrantEntry>,
}

impl AuthorizationHolder {
    /// Creates a holder with no grants.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a holder that passes every check.
    #[must_use]
    pub fn almighty(name: impl Into<String>) -> Self {
        Self {
            almighty: true,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_almighty(&self) -> bool {
        self.almighty
    }

    /// Turns the check bypass on or off.
    pub fn set_almighty(&mut self, almighty: bool) {
        self.almighty = almighty;
    }

    /// Role names attached to this holder. Checks do not consult them.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Replaces the role names.
    pub fn set_roles(&mut self, roles: Vec<String>) {
        self.roles = roles;
    }

    /// Appends a role name.
    pub fn add_role(&mut self, role: impl Into<String>) {
        self.roles.push(role.into());
    }

    /// Stores the grant for `context`, replacing any previous one.
    ///
    /// A resolved value of 0 removes the holder's entry for the context.
    /// On error the holder is unchanged.
    ///
    /// # Errors
    ///
    /// - [`AuthError::UnknownPermission`] if a name is not in the context.
    /// - [`AuthError::BitmaskOverflow`] if the value exceeds
    ///   [`AuthorizationContext::max_value`].
    pub fn grant(
        &mut self,
        permissions: impl Into<PermissionSet>,
        context: &Arc<AuthorizationContext>,
    ) -> Result<&mut Self, AuthError> {
        let value = match permissions.into() {
            PermissionSet::Names(names) => context.permissions_as_number(&names)?,
            PermissionSet::Mask(mask) => mask,
        };

        let max = context.max_value();
        if value > max {
            return Err(AuthError::BitmaskOverflow {
                context: context.name().to_string(),
                holder: self.name.clone(),
                value,
                max,
            });
        }

        let context_name = context.name().to_string();
        if value > 0 {
            debug!(holder = %self.name, context = %context_name, grant = value, "Stored grant");
            self.grants.insert(
                context_name,
                GrantEntry {
                    context: Arc::clone(context),
                    grant: value,
                },
            );
        } else if self.grants.shift_remove(&context_name).is_some() {
            debug!(holder = %self.name, context = %context_name, "Removed grant");
        }
        Ok(self)
    }

    /// Like [`grant`](Self::grant), resolving the context by name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingContext`] if the registry has no such
    /// context, otherwise fails like [`grant`](Self::grant).
    pub fn grant_by_name(
        &mut self,
        permissions: impl Into<PermissionSet>,
        context_name: &str,
        registry: &ContextRegistry,
    ) -> Result<&mut Self, AuthError> {
        let context = registry
            .get(context_name)
            .cloned()
            .ok_or_else(|| AuthError::MissingContext {
                context: context_name.to_string(),
                holder: self.name.clone(),
            })?;
        self.grant(permissions, &context)
    }

    /// Drops the grant for `context_name`, returning the removed mask.
    pub fn revoke(&mut self, context_name: &str) -> Option<Bitmask> {
        let removed = self.grants.shift_remove(context_name).map(|e| e.grant);
        if removed.is_some() {
            debug!(holder = %self.name, context = context_name, "Removed grant");
        }
        removed
    }

    /// The stored grant for a context.
    #[must_use]
    pub fn granted(&self, context_name: &str) -> Option<Bitmask> {
        self.grants.get(context_name).map(|e| e.grant)
    }

    /// Names of the bits granted in a context, lowest position first.
    #[must_use]
    pub fn granted_names(&self, context_name: &str) -> Vec<&str> {
        self.grants
            .get(context_name)
            .map(|e| e.context.names_for_mask(e.grant))
            .unwrap_or_default()
    }

    /// Contexts this holder has grants in, in grant order.
    pub fn contexts(&self) -> impl Iterator<Item = &Arc<AuthorizationContext>> + '_ {
        self.grants.values().map(|e| &e.context)
    }

    /// Checks `names` against the grant for `context_name` and says why
    /// access is denied.
    ///
    /// An unknown permission name is logged and reported as
    /// [`DenialReason::UnknownPermission`] rather than an error.
    pub fn evaluate<I, S>(&self, names: I, context_name: &str) -> Decision
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.almighty {
            return Decision::Granted;
        }

        let Some(entry) = self.grants.get(context_name) else {
            return Decision::Denied(DenialReason::NoGrant {
                context: context_name.to_string(),
            });
        };

        let required = match entry.context.mask_of(names) {
            Ok(mask) => mask,
            Err(permission) => {
                warn!(
                    holder = %self.name,
                    context = context_name,
                    permission = %permission,
                    "Unknown permission in check, denying"
                );
                return Decision::Denied(DenialReason::UnknownPermission {
                    context: context_name.to_string(),
                    permission,
                });
            }
        };

        let missing = required & !entry.grant;
        if missing == 0 {
            Decision::Granted
        } else {
            Decision::Denied(DenialReason::MissingBits {
                context: context_name.to_string(),
                missing,
            })
        }
    }

    /// Returns `true` if every name is granted in `context_name`.
    pub fn has_permissions<I, S>(&self, names: I, context_name: &str) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.evaluate(names, context_name).is_granted()
    }

    /// Returns `true` if `name` is granted in `context_name`.
    #[must_use]
    pub fn has_permission(&self, name: &str, context_name: &str) -> bool {
        self.has_permissions([name], context_name)
    }

    /// Checks one name or several, see [`PermissionQuery`].
    pub fn can(&self, query: impl Into<PermissionQuery>, context_name: &str) -> bool {
        match query.into() {
            PermissionQuery::One(name) => self.has_permission(&name, context_name),
            PermissionQuery::All(names) => self.has_permissions(&names, context_name),
        }
    }

    /// Serialized form: own fields, per-context grants, and the short form
    /// of each referenced context. The almighty flag is not emitted.
    #[must_use]
    pub fn to_json(&self) -> HolderJson {
        let mut permissions = IndexMap::with_capacity(self.grants.len());
        let mut auth_contexts = Vec::with_capacity(self.grants.len());
        for (context_name, entry) in &self.grants {
            permissions.insert(
                context_name.clone(),
                GrantJson {
                    grant: Some(entry.grant),
                    deny: None,
                },
            );
            auth_contexts.push(entry.context.to_short_json());
        }

        HolderJson {
            name: self.name.clone(),
            roles: self.roles.clone(),
            permissions,
            auth_contexts,
        }
    }

    /// Rebuilds a holder from its serialized form.
    ///
    /// Contexts are resolved by name through `registry`; the embedded short
    /// forms are not used since they cannot rebuild a context.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingContext`] for a context the registry does
    /// not know, or [`AuthError::BitmaskOverflow`] for a grant that no
    /// longer fits the registered context.
    pub fn from_json(json: HolderJson, registry: &ContextRegistry) -> Result<Self, AuthError> {
        let mut holder = Self::new(json.name);
        holder.roles = json.roles;
        for (context_name, entry) in json.permissions {
            if let Some(grant) = entry.grant {
                holder.grant_by_name(grant, &context_name, registry)?;
            }
        }
        Ok(holder)
    }
}

impl Serialize for AuthorizationHolder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
