//! Permission catalog loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global catalog (`~/.janux/auth.toml`)
//! 3. Project catalog (`<root>/.janux/auth.toml`)
//! 4. Environment variables (`JANUX_*`)
//!
//! Each layer overrides the previous.

use super::{
    default_config_path, AuthConfig, CatalogLayer, ConfigError, PROJECT_CONFIG_DIR,
    PROJECT_CONFIG_FILE,
};
use crate::registry::ContextRegistry;
use janux_types::MAX_PERMISSION_BITS;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding [`AuthConfig::max_bits`].
pub const ENV_MAX_BITS: &str = "JANUX_MAX_BITS";

/// Catalog loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use janux_auth::config::ConfigLoader;
///
/// let registry = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .load_registry()?;
/// # Ok::<(), janux_auth::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global catalog path (defaults to ~/.janux/auth.toml).
    global_config_path: Option<PathBuf>,

    project_root: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global catalog path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// The project catalog is read from `<project_root>/.janux/auth.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges the catalog from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a catalog file exists but cannot be read
    /// or parsed, or if an environment override is invalid. Missing files
    /// are skipped.
    pub fn load(&self) -> Result<AuthConfig, ConfigError> {
        let mut config = AuthConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global) = load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global permission catalog");
                config.merge(&global);
            }
        }

        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project) = load_file(&project_path)? {
                    debug!(
                        path = %project_path.display(),
                        project = %project_root.display(),
                        "Loaded project permission catalog"
                    );
                    config.merge(&project);
                }
            }
        }

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads the catalog and builds every context it defines.
    ///
    /// # Errors
    ///
    /// Fails like [`load`](Self::load), or with [`ConfigError::Catalog`] if
    /// a context definition is invalid.
    pub fn load_registry(&self) -> Result<ContextRegistry, ConfigError> {
        let config = self.load()?;
        Ok(ContextRegistry::from_config(&config)?)
    }
}

/// Reads a catalog file, returning `None` if it does not exist.
fn load_file(path: &Path) -> Result<Option<CatalogLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let layer = CatalogLayer::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    Ok(Some(layer))
}

fn apply_env_vars(config: &mut AuthConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var(ENV_MAX_BITS) {
        config.max_bits = parse_max_bits(&val)?;
        debug!(max_bits = config.max_bits, var = ENV_MAX_BITS, "Applied environment override");
    }
    Ok(())
}

fn parse_max_bits(s: &str) -> Result<u32, ConfigError> {
    match s.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_PERMISSION_BITS).contains(&n) => Ok(n),
        _ => Err(ConfigError::invalid_env_var(
            ENV_MAX_BITS,
            format!("expected an integer in 1..={MAX_PERMISSION_BITS}, got '{s}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janux_types::ErrorCode;
    use tempfile::TempDir;

    fn write_catalog(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("auth.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, AuthConfig::default());
    }

    #[test]
    fn load_global_catalog() {
        let temp = TempDir::new().unwrap();
        let path = write_catalog(
            temp.path(),
            r#"
max_bits = 16

[[contexts]]
name = "PERSON"
bits = ["READ", "UPDATE"]
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.max_bits, 16);
        assert_eq!(config.contexts.len(), 1);
    }

    #[test]
    fn project_overrides_global() {
        let global_temp = TempDir::new().unwrap();
        let project_temp = TempDir::new().unwrap();
        let janux_dir = project_temp.path().join(".janux");
        std::fs::create_dir_all(&janux_dir).unwrap();

        let global_path = write_catalog(
            global_temp.path(),
            r#"
max_bits = 16

[[contexts]]
name = "PERSON"
bits = ["READ"]

[[contexts]]
name = "ACCOUNT"
bits = ["READ"]
"#,
        );
        write_catalog(
            &janux_dir,
            r#"
[[contexts]]
name = "PERSON"
bits = ["READ", "UPDATE", "DELETE"]
"#,
        );

        let registry = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load_registry()
            .unwrap();

        // max_bits from global, PERSON from project, ACCOUNT untouched
        let person = registry.get("PERSON").unwrap();
        assert_eq!(person.len(), 3);
        assert_eq!(person.bit_limit(), 16);
        assert_eq!(registry.get("ACCOUNT").unwrap().len(), 1);
    }

    #[test]
    fn project_can_restore_full_width() {
        let global_temp = TempDir::new().unwrap();
        let project_temp = TempDir::new().unwrap();
        let janux_dir = project_temp.path().join(".janux");
        std::fs::create_dir_all(&janux_dir).unwrap();

        let global_path = write_catalog(global_temp.path(), "max_bits = 16");
        write_catalog(&janux_dir, "max_bits = 64");

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.max_bits, 64);
    }

    #[test]
    fn missing_files_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/auth.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, AuthConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = write_catalog(temp.path(), "max_bits = \"many\"");

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert_eq!(err.code(), "CONFIG_PARSE_TOML");
        assert!(err.to_string().contains("auth.toml"));
    }

    #[test]
    fn invalid_context_surfaces_as_catalog_error() {
        let temp = TempDir::new().unwrap();
        let path = write_catalog(
            temp.path(),
            r#"
max_bits = 1

[[contexts]]
name = "PERSON"
bits = ["READ", "UPDATE"]
"#,
        );

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load_registry()
            .unwrap_err();

        assert_eq!(err.code(), "CONFIG_CATALOG");
    }

    #[test]
    fn parse_max_bits_values() {
        assert_eq!(parse_max_bits("1").unwrap(), 1);
        assert_eq!(parse_max_bits(" 31 ").unwrap(), 31);
        assert_eq!(parse_max_bits("64").unwrap(), 64);

        for bad in ["0", "65", "-1", "many", ""] {
            let err = parse_max_bits(bad).unwrap_err();
            assert_eq!(err.code(), "CONFIG_INVALID_ENV_VAR");
        }
    }

    #[test]
    fn env_var_override() {
        // This test modifies env vars, run in isolation
        let temp = TempDir::new().unwrap();
        let path = write_catalog(temp.path(), "max_bits = 16");

        std::env::set_var(ENV_MAX_BITS, "31");
        let config = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .load();

        std::env::set_var(ENV_MAX_BITS, "0");
        let invalid = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .load();

        // Cleanup before asserting so a failure does not leak the var
        std::env::remove_var(ENV_MAX_BITS);

        assert_eq!(config.unwrap().max_bits, 31);
        assert_eq!(invalid.unwrap_err().code(), "CONFIG_INVALID_ENV_VAR");
    }
}
