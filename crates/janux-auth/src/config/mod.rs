//! Permission catalog with hierarchical layering.
//!
//! # Architecture
//!
//! Context definitions are loaded from TOML files and merged by priority:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────┐
//! │  1. Environment Variables (JANUX_*)      │  Runtime override
//! ├──────────────────────────────────────────┤
//! │  2. Project Catalog (.janux/auth.toml)   │  Project-specific
//! ├──────────────────────────────────────────┤
//! │  3. Global Catalog (~/.janux/auth.toml)  │  User defaults
//! ├──────────────────────────────────────────┤
//! │  4. Default Values (compile-time)        │  Fallback
//! └──────────────────────────────────────────┘
//! ```
//!
//! Contexts merge by name: a later layer replaces the whole definition.
//! `max_bits` is overridden only by a layer that sets it.
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `JANUX_MAX_BITS` | `max_bits` | integer in 1..=64 |
//!
//! # Example Catalog
//!
//! ```toml
//! # ~/.janux/auth.toml
//! max_bits = 31
//!
//! [[contexts]]
//! name = "PERSON"
//! description = "Person"
//! bits = ["READ", "UPDATE", "DELETE", "PURGE"]
//!
//! [[contexts]]
//! name = "ACCOUNT"
//! description = "Account"
//! enabled = false
//! bits = ["READ", { name = "LOCK", description = "Lock an account", sort_order = 9 }]
//! ```

mod error;
mod loader;
mod types;

use std::path::PathBuf;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_MAX_BITS};
pub use types::{AuthConfig, BitConfig, BitEntry, CatalogLayer, ContextConfig};

/// Default global config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".janux")
}

/// Default global catalog path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("auth.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".janux";

/// Project catalog file name.
pub const PROJECT_CONFIG_FILE: &str = "auth.toml";
