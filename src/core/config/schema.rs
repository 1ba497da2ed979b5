//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$REPOWIZ_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/repowiz/config.toml`
//! 3. `~/.repowiz/config.toml`
//!
//! # Workspace Config
//!
//! Located at `<root>/.repowiz.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a bad remote name or
//! an empty repository path is reported at load time, not mid-wizard.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// interactive = true
///
/// [push]
/// confirm = true
/// remote = "origin"
///
/// [discovery]
/// max_depth = 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default interactive mode
    pub interactive: Option<bool>,

    /// Push defaults
    pub push: Option<PushDefaults>,

    /// Repository discovery settings
    pub discovery: Option<DiscoveryConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(push) = &self.push {
            push.validate()?;
        }
        if let Some(discovery) = &self.discovery {
            discovery.validate()?;
        }
        Ok(())
    }
}

/// Workspace configuration.
///
/// # Example
///
/// ```toml
/// repositories = ["api", "web", "../shared/tools"]
/// exclude = ["scratch"]
///
/// [push]
/// confirm = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Explicit repository paths, relative to the workspace root.
    /// When empty, repositories are discovered by scanning.
    pub repositories: Vec<PathBuf>,

    /// Directory names skipped during discovery
    pub exclude: Vec<String>,

    /// Push overrides for this workspace
    pub push: Option<PushDefaults>,
}

impl WorkspaceConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repositories.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "repository path cannot be empty".to_string(),
            ));
        }
        if let Some(push) = &self.push {
            push.validate()?;
        }
        Ok(())
    }
}

/// Push command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PushDefaults {
    /// Show the confirmation step (default: true)
    pub confirm: Option<bool>,

    /// Remote to push to when a branch has no upstream
    pub remote: Option<String>,
}

impl PushDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            if remote.is_empty() || remote.contains(char::is_whitespace) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid remote name '{}'",
                    remote
                )));
            }
        }
        Ok(())
    }
}

/// Repository discovery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// How many directory levels below the root to scan
    pub max_depth: Option<usize>,
}

impl DiscoveryConfig {
    /// Largest accepted scan depth.
    pub const MAX_DEPTH_LIMIT: usize = 8;

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(depth) = self.max_depth {
            if depth > Self::MAX_DEPTH_LIMIT {
                return Err(ConfigError::InvalidValue(format!(
                    "discovery.max_depth {} exceeds limit of {}",
                    depth,
                    Self::MAX_DEPTH_LIMIT
                )));
            }
        }
        Ok(())
    }
}
