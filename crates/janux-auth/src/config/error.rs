//! Configuration errors.

use crate::error::AuthError;
use janux_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a permission catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a catalog file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// The catalog parsed but describes an invalid context.
    #[error("invalid permission catalog: {0}")]
    Catalog(#[from] AuthError),
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::Catalog(_) => "CONFIG_CATALOG",
        }
    }

    fn is_recoverable(&self) -> bool {
        // a missing or locked file can be fixed without a code change
        matches!(self, Self::ReadFile { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janux_types::assert_error_code;

    #[test]
    fn env_var_error_display() {
        let err = ConfigError::invalid_env_var("JANUX_MAX_BITS", "expected 1..=64");
        assert!(err.to_string().contains("JANUX_MAX_BITS"));
        assert!(err.to_string().contains("expected 1..=64"));
        assert_error_code(&err, "CONFIG_");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn catalog_wraps_auth_error() {
        let err = ConfigError::from(AuthError::InvalidArgument("empty".into()));
        assert_eq!(err.code(), "CONFIG_CATALOG");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn read_file_is_recoverable() {
        let err = ConfigError::read_file(
            "/nowhere/auth.toml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_recoverable());
        assert_error_code(&err, "CONFIG_");
    }
}
