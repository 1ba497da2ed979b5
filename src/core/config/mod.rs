//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! repowiz has two configuration scopes:
//! - **Global**: User-level settings
//! - **Workspace**: Settings for the directory whose repositories are offered
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Workspace config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$REPOWIZ_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/repowiz/config.toml`
//! 3. `~/.repowiz/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use repowiz::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/workspace"))).unwrap().config;
//! println!("Confirm pushes: {}", config.push_confirm());
//! println!("Remote: {}", config.push_remote());
//! ```

pub mod schema;

pub use schema::{DiscoveryConfig, GlobalConfig, PushDefaults, WorkspaceConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// File name of the workspace config, relative to the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = ".repowiz.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Files that contributed to the configuration, in load order.
    pub sources: Vec<PathBuf>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: workspace config overrides
/// global config, and both fall back to built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Workspace configuration (if a workspace file exists)
    pub workspace: Option<WorkspaceConfig>,
}

impl Config {
    /// Default number of directory levels scanned below the workspace root.
    pub const DEFAULT_MAX_DEPTH: usize = 1;

    /// Load configuration from default locations.
    ///
    /// If `workspace_root` is provided, also loads `<root>/.repowiz.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(workspace_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), workspace_root)
    }

    /// Load configuration from an explicit global file and workspace root.
    pub fn load_from(
        global_path: Option<&Path>,
        workspace_root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut sources = Vec::new();

        let global = match global_path {
            Some(path) if path.exists() => {
                sources.push(path.to_path_buf());
                read_toml::<GlobalConfig>(path)?
            }
            _ => GlobalConfig::default(),
        };

        let workspace = match workspace_root {
            Some(root) => {
                let path = root.join(WORKSPACE_CONFIG_FILE);
                if path.exists() {
                    let config = read_toml::<WorkspaceConfig>(&path)?;
                    sources.push(path);
                    Some(config)
                } else {
                    None
                }
            }
            None => None,
        };

        global.validate()?;
        if let Some(ref w) = workspace {
            w.validate()?;
        }

        tracing::debug!(?sources, "configuration loaded");

        Ok(ConfigLoadResult {
            config: Config { global, workspace },
            sources,
        })
    }

    /// Locate the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $REPOWIZ_CONFIG
        if let Ok(path) = std::env::var("REPOWIZ_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/repowiz/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("repowiz/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.repowiz/config.toml
        let path = dirs::home_dir()?.join(".repowiz/config.toml");
        path.exists().then_some(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Whether the push confirmation step is shown.
    ///
    /// Defaults to `true` if not configured.
    pub fn push_confirm(&self) -> bool {
        self.workspace_push()
            .and_then(|p| p.confirm)
            .or_else(|| self.global.push.as_ref().and_then(|p| p.confirm))
            .unwrap_or(true)
    }

    /// Remote used for branches without an upstream.
    ///
    /// Defaults to "origin" if not configured.
    pub fn push_remote(&self) -> &str {
        self.workspace_push()
            .and_then(|p| p.remote.as_deref())
            .or_else(|| self.global.push.as_ref().and_then(|p| p.remote.as_deref()))
            .unwrap_or("origin")
    }

    /// Maximum discovery depth below the workspace root.
    pub fn max_depth(&self) -> usize {
        self.global
            .discovery
            .as_ref()
            .and_then(|d| d.max_depth)
            .unwrap_or(Self::DEFAULT_MAX_DEPTH)
    }

    /// Explicit repository list from the workspace file.
    pub fn repositories(&self) -> &[PathBuf] {
        self.workspace
            .as_ref()
            .map(|w| w.repositories.as_slice())
            .unwrap_or(&[])
    }

    /// Directory names skipped during discovery.
    pub fn excluded(&self) -> &[String] {
        self.workspace
            .as_ref()
            .map(|w| w.exclude.as_slice())
            .unwrap_or(&[])
    }

    fn workspace_push(&self) -> Option<&PushDefaults> {
        self.workspace.as_ref().and_then(|w| w.push.as_ref())
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
