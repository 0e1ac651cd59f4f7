//! Bootstrap configuration from YAML

use crate::core::descriptor::StepDescriptor;
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Pattern every step identifier must match
pub const STEP_ID_PATTERN: &str = r"^[a-z][a-z0-9_.-]*$";

/// Top-level bootstrap configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Application name
    pub name: String,

    /// Run the pipeline as soon as the host activates it
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,

    /// Step identifiers in execution order
    #[serde(default)]
    pub steps: Vec<StepDescriptor>,
}

fn default_auto_start() -> bool {
    true
}

impl BootstrapConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BootstrapConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Default location: `<config dir>/bootstrap/boot.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bootstrap").join("boot.yaml"))
    }

    /// Validate the configuration.
    ///
    /// Identifiers are only checked for shape here. Whether they name a known
    /// step is decided at registration time.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Bootstrap name must not be empty");
        }

        let pattern = Regex::new(STEP_ID_PATTERN)?;
        let mut seen = HashSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            if !pattern.is_match(step.as_str()) {
                anyhow::bail!(
                    "Step {} has malformed identifier '{}' (expected {})",
                    index,
                    step,
                    STEP_ID_PATTERN
                );
            }
            if !seen.insert(step.as_str()) {
                warn!(
                    "Step '{}' is listed more than once and will run again at index {}",
                    step, index
                );
            }
        }

        Ok(())
    }
}
