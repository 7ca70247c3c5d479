//! Base-station topology generation.
//!
//! Produces a coverage-cell layout for an external slicing simulator: each
//! base station has a channel capacity, a coverage radius, a per-slice ratio
//! table and random coordinates. The allocation core never reads it.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Failed to write topology file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid topology: {0}")]
    Validation(String),
}

/// Parameters for a generated topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySpec {
    pub base_station_count: u32,
    pub num_slices: u32,
    /// Capacity of every base station in bps.
    pub capacity_bandwidth: u64,
    /// Coverage radius of the first station.
    pub coverage_base: u32,
    /// Coverage added per subsequent station.
    pub coverage_step: u32,
    /// Coordinates are drawn from `[0, area]` on both axes.
    pub area: u32,
}

impl Default for TopologySpec {
    fn default() -> Self {
        Self {
            base_station_count: 30,
            num_slices: 1000,
            capacity_bandwidth: 20_000_000_000,
            coverage_base: 200,
            coverage_step: 10,
            area: 1980,
        }
    }
}

/// One coverage cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStation {
    pub capacity_bandwidth: u64,
    pub coverage: u32,
    /// `slice_<j>` to share of capacity, in slice order.
    pub ratios: Mapping,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub base_stations: Vec<BaseStation>,
}

impl TopologySpec {
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.base_station_count == 0 {
            return Err(TopologyError::Validation(
                "base_station_count must be > 0".to_string(),
            ));
        }
        if self.num_slices == 0 {
            return Err(TopologyError::Validation(
                "num_slices must be > 0".to_string(),
            ));
        }
        let last_coverage = (self.base_station_count - 1)
            .checked_mul(self.coverage_step)
            .and_then(|extra| extra.checked_add(self.coverage_base));
        if last_coverage.is_none() {
            return Err(TopologyError::Validation(format!(
                "coverage of station {} overflows (base {}, step {})",
                self.base_station_count, self.coverage_base, self.coverage_step
            )));
        }
        Ok(())
    }
}

/// Generate a topology with an even slice split on every station.
pub fn generate_topology(
    spec: &TopologySpec,
    rng: &mut dyn RngCore,
) -> Result<Topology, TopologyError> {
    spec.validate()?;
    let ratio = 1.0 / spec.num_slices as f64;
    let mut ratios = Mapping::new();
    for j in 1..=spec.num_slices {
        ratios.insert(Value::String(format!("slice_{}", j)), Value::from(ratio));
    }

    let base_stations = (0..spec.base_station_count)
        .map(|i| BaseStation {
            capacity_bandwidth: spec.capacity_bandwidth,
            coverage: spec.coverage_base + i * spec.coverage_step,
            ratios: ratios.clone(),
            x: rng.gen_range(0..=spec.area),
            y: rng.gen_range(0..=spec.area),
        })
        .collect();

    Ok(Topology { base_stations })
}

/// Write a topology as YAML.
pub fn save_topology(topology: &Topology, path: &Path) -> Result<(), TopologyError> {
    let yaml = serde_yaml::to_string(topology)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
