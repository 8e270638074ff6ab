//! # Registry Configuration
//!
//! Tunables for a registry instance, loaded from YAML. Every field has a
//! default, so an empty document (or no document at all) yields a working
//! configuration.
//!
//! ```yaml
//! credits_per_course: 10
//! max_events: 10000
//! registry_account: registry
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use creg_core::Address;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV_VAR: &str = "CREG_CONFIG";

const DEFAULT_CREDITS_PER_COURSE: u64 = 10;
const DEFAULT_MAX_EVENTS: usize = 10_000;
const DEFAULT_REGISTRY_ACCOUNT: &str = "registry";

/// Errors loading or validating a [`RegistryConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML for this schema.
    #[error("invalid configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration of a credential registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Credits awarded the first time a student completes a course.
    pub credits_per_course: u64,
    /// Capacity of the in-memory event log before the oldest entries are
    /// trimmed.
    pub max_events: usize,
    /// Account that holds an enrollment payment while it is split between
    /// the instructor and the refund.
    pub registry_account: Address,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            credits_per_course: DEFAULT_CREDITS_PER_COURSE,
            max_events: DEFAULT_MAX_EVENTS,
            registry_account: Address::new(DEFAULT_REGISTRY_ACCOUNT)
                .unwrap_or_else(|_| Address::null()),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), "loaded registry configuration");
        Ok(config)
    }

    /// Load from the file named by `CREG_CONFIG`, or fall back to defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the registry cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_events == 0 {
            return Err(ConfigError::Invalid(
                "max_events must be greater than zero".to_string(),
            ));
        }
        if self.registry_account.is_null() {
            return Err(ConfigError::Invalid(
                "registry_account must not be the null address".to_string(),
            ));
        }
        Ok(())
    }
}
