//! suitegen project configuration
//!
//! Handles loading of the optional `.suitegen.yaml` file and merging its
//! defaults with command-line overrides. Precedence is: command line, then
//! config file, then built-in defaults.

use crate::batch::MergePolicy;
use crate::error::{Error, Result};
use crate::framework::Framework;
use crate::render::{PytestLayout, RenderOptions};
use crate::spec::FeatureFlags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = ".suitegen.yaml";

/// Project configuration (`.suitegen.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectConfig {
    /// Schema version for migrations
    pub version: u32,

    /// Defaults for every generation run in this project
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default settings applied when the command line leaves them unset
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DefaultsConfig {
    /// Framework for specs that do not name one
    #[serde(default = "default_framework")]
    pub framework: Framework,

    /// Directory generated files are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub pytest_layout: PytestLayout,

    /// Stamp the generation time into headers
    #[serde(default)]
    pub timestamp: bool,

    /// Merge batch entries that share a subject and framework
    #[serde(default = "default_true")]
    pub merge: bool,

    /// Scaffold blocks for specs that leave `include_*` unset
    #[serde(default)]
    pub features: FeatureFlags,
}

fn default_framework() -> Framework {
    Framework::Pytest
}

fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            framework: default_framework(),
            output_dir: None,
            pytest_layout: PytestLayout::default(),
            timestamp: false,
            merge: true,
            features: FeatureFlags::default(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            version: 1,
            defaults: DefaultsConfig::default(),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub framework: Option<Framework>,
    pub output: Option<PathBuf>,
    pub pytest_layout: Option<PytestLayout>,
    pub timestamp: Option<bool>,
    pub merge: Option<bool>,
    /// Switches only turn features on
    pub features: FeatureFlags,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub framework: Framework,
    pub output: Option<PathBuf>,
    pub pytest_layout: PytestLayout,
    pub timestamp: bool,
    pub merge_policy: MergePolicy,
    pub features: FeatureFlags,
}

impl Settings {
    /// Render options; a requested timestamp is taken now
    pub fn render_options(&self) -> RenderOptions {
        let options = RenderOptions {
            timestamp: None,
            pytest_layout: self.pytest_layout,
        };
        if self.timestamp {
            options.with_timestamp_now()
        } else {
            options
        }
    }
}

impl ProjectConfig {
    /// Load `.suitegen.yaml` from a directory, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(dir = %dir.display(), "no {} found", CONFIG_FILE);
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Load a config file from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate config YAML
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: ProjectConfig = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        if config.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}",
                config.version
            )));
        }

        Ok(config)
    }

    /// Merge command-line overrides over the file defaults
    pub fn merge(&self, overrides: &Overrides) -> Settings {
        let defaults = &self.defaults;
        let merge = overrides.merge.unwrap_or(defaults.merge);
        Settings {
            framework: overrides.framework.unwrap_or(defaults.framework),
            output: overrides
                .output
                .clone()
                .or_else(|| defaults.output_dir.clone()),
            pytest_layout: overrides.pytest_layout.unwrap_or(defaults.pytest_layout),
            timestamp: overrides.timestamp.unwrap_or(defaults.timestamp),
            merge_policy: if merge {
                MergePolicy::Consolidate
            } else {
                MergePolicy::Separate
            },
            features: defaults.features.union(overrides.features),
        }
    }
}
