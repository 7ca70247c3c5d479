//! Workload snapshots in YAML.
//!
//! Writes the most recently generated application set keyed by slice index
//! (`slice_1`, `slice_2`, ...) and reads such snapshots back so a single
//! workload can be replayed against several policies.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use slicesim_policies::{SliceApplication, UsagePattern};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to access workload file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode or decode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid slice {slice}: {reason}")]
    InvalidSlice { slice: String, reason: String },
}

/// On-disk form of one slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceRecord {
    pub bandwidth_guaranteed: f64,
    pub bandwidth_max: f64,
    pub client_weight: f64,
    pub delay_tolerance: u32,
    pub qos_class: u32,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub usage_pattern: UsagePattern,
}

impl From<&SliceApplication> for SliceRecord {
    fn from(app: &SliceApplication) -> Self {
        Self {
            bandwidth_guaranteed: app.min_bandwidth,
            bandwidth_max: app.max_bandwidth,
            client_weight: app.client_weight,
            delay_tolerance: app.delay_tolerance,
            qos_class: app.qos_class,
            threshold: app.threshold,
            usage_pattern: app.usage_pattern.clone(),
        }
    }
}

impl SliceRecord {
    fn into_application(self, slice: &str) -> Result<SliceApplication, ExportError> {
        let invalid = |reason: String| ExportError::InvalidSlice {
            slice: slice.to_string(),
            reason,
        };
        if !(self.bandwidth_guaranteed.is_finite() && self.bandwidth_guaranteed >= 0.0) {
            return Err(invalid(format!(
                "bandwidth_guaranteed must be >= 0, got {}",
                self.bandwidth_guaranteed
            )));
        }
        if !(self.bandwidth_max.is_finite() && self.bandwidth_max >= self.bandwidth_guaranteed) {
            return Err(invalid(format!(
                "bandwidth_max ({}) must be >= bandwidth_guaranteed ({})",
                self.bandwidth_max, self.bandwidth_guaranteed
            )));
        }
        if self.qos_class == 0 {
            return Err(invalid("qos_class must be >= 1".to_string()));
        }
        if self.delay_tolerance == 0 {
            return Err(invalid("delay_tolerance must be > 0".to_string()));
        }

        let mut app = SliceApplication::new(
            self.bandwidth_guaranteed,
            self.bandwidth_max,
            self.qos_class,
            self.delay_tolerance,
            self.client_weight,
        );
        app.threshold = self.threshold;
        app.usage_pattern = self.usage_pattern;
        Ok(app)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SlicesDocument {
    slices: Mapping,
}

fn slice_index(key: &str) -> Option<usize> {
    key.strip_prefix("slice_")?.parse().ok()
}

/// Render applications as a YAML document.
pub fn workload_to_yaml(apps: &[SliceApplication]) -> Result<String, ExportError> {
    let mut slices = Mapping::new();
    for (i, app) in apps.iter().enumerate() {
        slices.insert(
            Value::String(format!("slice_{}", i + 1)),
            serde_yaml::to_value(SliceRecord::from(app))?,
        );
    }
    Ok(serde_yaml::to_string(&SlicesDocument { slices })?)
}

/// Parse a YAML snapshot back into applications, ordered by slice index.
pub fn workload_from_yaml(yaml: &str) -> Result<Vec<SliceApplication>, ExportError> {
    let document: SlicesDocument = serde_yaml::from_str(yaml)?;
    let mut indexed = Vec::with_capacity(document.slices.len());

    for (key, value) in document.slices {
        let name = key.as_str().unwrap_or_default().to_string();
        let index = slice_index(&name).ok_or_else(|| ExportError::InvalidSlice {
            slice: format!("{:?}", key),
            reason: "expected a key of the form slice_<n>".to_string(),
        })?;
        let record: SliceRecord = serde_yaml::from_value(value)?;
        indexed.push((index, record.into_application(&name)?));
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, app)| app).collect())
}

/// Write a workload snapshot to `path`, replacing any previous one.
pub fn save_workload(apps: &[SliceApplication], path: &Path) -> Result<(), ExportError> {
    let yaml = workload_to_yaml(apps)?;
    std::fs::write(path, yaml)?;
    debug!(slices = apps.len(), path = %path.display(), "workload snapshot written");
    Ok(())
}

/// Load a workload snapshot written by [`save_workload`].
pub fn load_workload(path: &Path) -> Result<Vec<SliceApplication>, ExportError> {
    let content = std::fs::read_to_string(path)?;
    let apps = workload_from_yaml(&content)?;
    debug!(slices = apps.len(), path = %path.display(), "workload snapshot loaded");
    Ok(apps)
}
