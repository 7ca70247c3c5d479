//! TOML configuration parsing for SliceSim.
//!
//! Defines the configuration schema for a scaling comparison: the shared
//! channel, the workload sizes and attribute ranges, the policies to compare,
//! and where to write results.

use crate::workload::{WorkloadError, WorkloadSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
    #[error("Invalid workload ranges: {0}")]
    Workload(#[from] WorkloadError),
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub channel: ChannelSection,
    #[serde(default)]
    pub workload: WorkloadSection,
    #[serde(default)]
    pub policies: PoliciesSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// General simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Human-readable name for this comparison.
    #[serde(default = "default_sim_name")]
    pub name: String,
    /// Random seed for reproducibility. Unset means entropy-seeded runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_sim_name() -> String {
    "slicing-comparison".to_string()
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            name: default_sim_name(),
            seed: None,
        }
    }
}

/// The shared channel being divided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSection {
    /// Total channel capacity in bps.
    #[serde(default = "default_total_bandwidth")]
    pub total_bandwidth_bps: f64,
}

fn default_total_bandwidth() -> f64 {
    5_000_000_000.0
}

impl Default for ChannelSection {
    fn default() -> Self {
        Self {
            total_bandwidth_bps: default_total_bandwidth(),
        }
    }
}

/// Workload sizes and attribute ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSection {
    /// Number of competing applications per scaling step.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    #[serde(flatten)]
    pub spec: WorkloadSpec,
}

fn default_sizes() -> Vec<usize> {
    vec![50, 100, 200, 500, 1000]
}

impl Default for WorkloadSection {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            spec: WorkloadSpec::default(),
        }
    }
}

/// Which policies take part in the comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliciesSection {
    #[serde(default = "default_enabled_policies")]
    pub enabled: Vec<String>,
}

fn default_enabled_policies() -> Vec<String> {
    slicesim_policies::default_policies()
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for PoliciesSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled_policies(),
        }
    }
}

/// Optional output locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// YAML snapshot of the last generated workload.
    pub workload_path: Option<String>,
    /// JSON dump of every metrics record.
    pub results_path: Option<String>,
    /// Directory for one HTML chart per metric.
    pub charts_dir: Option<String>,
}

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.channel.total_bandwidth_bps;
        if !total.is_finite() || total < 0.0 {
            return Err(ConfigError::Validation(format!(
                "total_bandwidth_bps must be a finite value >= 0, got {}",
                total
            )));
        }
        if self.workload.sizes.is_empty() {
            return Err(ConfigError::Validation(
                "workload.sizes must not be empty".to_string(),
            ));
        }
        if self.workload.sizes.contains(&0) {
            return Err(ConfigError::Validation(
                "workload.sizes must all be > 0".to_string(),
            ));
        }
        if self.policies.enabled.is_empty() {
            return Err(ConfigError::Validation(
                "policies.enabled must name at least one policy".to_string(),
            ));
        }
        let known = slicesim_policies::available_policies();
        if let Some(unknown) = self
            .policies
            .enabled
            .iter()
            .find(|name| !known.contains(&name.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "Unknown policy: {}. Available: {:?}",
                unknown, known
            )));
        }
        self.workload.spec.validate()?;
        Ok(())
    }

    pub fn total_bandwidth(&self) -> f64 {
        self.channel.total_bandwidth_bps
    }

    pub fn enabled_policies(&self) -> Vec<&str> {
        self.policies.enabled.iter().map(String::as_str).collect()
    }
}
