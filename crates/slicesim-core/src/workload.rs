//! Synthetic workload generation.
//!
//! Produces independent [`SliceApplication`]s whose bandwidth, QoS, delay
//! and client-weight attributes are drawn uniformly from configured ranges.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use slicesim_policies::SliceApplication;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkloadError {
    #[error("Workload must contain at least one application")]
    EmptyWorkload,
    #[error("Invalid range for {field}: {reason}")]
    InvalidRange { field: &'static str, reason: String },
    #[error(
        "max_bandwidth range (up to {max_high}) cannot exceed min_bandwidth range (up to {min_high})"
    )]
    UnsatisfiableBandwidth { min_high: u64, max_high: u64 },
}

/// Uniform range with explicit bounds, as written in the TOML config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange<T> {
    pub low: T,
    pub high: T,
}

impl<T> UniformRange<T> {
    pub const fn new(low: T, high: T) -> Self {
        Self { low, high }
    }
}

/// Attribute ranges for generated applications.
///
/// Integer ranges are inclusive on both ends; the client weight range is
/// half-open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// SLA floor in bps.
    #[serde(default = "default_min_bandwidth")]
    pub min_bandwidth_bps: UniformRange<u64>,
    /// Ceiling in bps.
    #[serde(default = "default_max_bandwidth")]
    pub max_bandwidth_bps: UniformRange<u64>,
    #[serde(default = "default_qos_class")]
    pub qos_class: UniformRange<u32>,
    #[serde(default = "default_delay_tolerance")]
    pub delay_tolerance_ms: UniformRange<u32>,
    #[serde(default = "default_client_weight")]
    pub client_weight: UniformRange<f64>,
}

fn default_min_bandwidth() -> UniformRange<u64> {
    UniformRange::new(5_000_000, 20_000_000)
}
fn default_max_bandwidth() -> UniformRange<u64> {
    UniformRange::new(20_000_000, 100_000_000)
}
fn default_qos_class() -> UniformRange<u32> {
    UniformRange::new(1, 5)
}
fn default_delay_tolerance() -> UniformRange<u32> {
    UniformRange::new(10, 500)
}
fn default_client_weight() -> UniformRange<f64> {
    UniformRange::new(0.01, 0.1)
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            min_bandwidth_bps: default_min_bandwidth(),
            max_bandwidth_bps: default_max_bandwidth(),
            qos_class: default_qos_class(),
            delay_tolerance_ms: default_delay_tolerance(),
            client_weight: default_client_weight(),
        }
    }
}

fn check_ordered<T: PartialOrd + std::fmt::Display>(
    field: &'static str,
    range: &UniformRange<T>,
) -> Result<(), WorkloadError> {
    if range.low > range.high {
        return Err(WorkloadError::InvalidRange {
            field,
            reason: format!("low ({}) > high ({})", range.low, range.high),
        });
    }
    Ok(())
}

impl WorkloadSpec {
    /// Validate that every range can produce a well-formed application.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        check_ordered("min_bandwidth_bps", &self.min_bandwidth_bps)?;
        check_ordered("max_bandwidth_bps", &self.max_bandwidth_bps)?;
        check_ordered("qos_class", &self.qos_class)?;
        check_ordered("delay_tolerance_ms", &self.delay_tolerance_ms)?;

        if self.min_bandwidth_bps.low == 0 {
            return Err(WorkloadError::InvalidRange {
                field: "min_bandwidth_bps",
                reason: "minimum bandwidth must be > 0".to_string(),
            });
        }
        if self.min_bandwidth_bps.high >= self.max_bandwidth_bps.high {
            return Err(WorkloadError::UnsatisfiableBandwidth {
                min_high: self.min_bandwidth_bps.high,
                max_high: self.max_bandwidth_bps.high,
            });
        }
        if self.qos_class.low < 1 {
            return Err(WorkloadError::InvalidRange {
                field: "qos_class",
                reason: "QoS class must be >= 1".to_string(),
            });
        }
        if self.delay_tolerance_ms.low == 0 {
            return Err(WorkloadError::InvalidRange {
                field: "delay_tolerance_ms",
                reason: "delay tolerance must be > 0".to_string(),
            });
        }
        let weight = &self.client_weight;
        if !(weight.low > 0.0 && weight.high < 1.0 && weight.low < weight.high) {
            return Err(WorkloadError::InvalidRange {
                field: "client_weight",
                reason: format!(
                    "expected 0 < low < high < 1, got [{}, {})",
                    weight.low, weight.high
                ),
            });
        }
        Ok(())
    }
}

/// Generator of fresh, independently owned workloads.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    spec: WorkloadSpec,
}

impl WorkloadGenerator {
    pub fn new(spec: WorkloadSpec) -> Result<Self, WorkloadError> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> &WorkloadSpec {
        &self.spec
    }

    /// Generate `n` applications with zeroed allocations.
    pub fn generate(
        &self,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<SliceApplication>, WorkloadError> {
        if n == 0 {
            return Err(WorkloadError::EmptyWorkload);
        }
        Ok((0..n).map(|_| self.generate_one(rng)).collect())
    }

    fn generate_one(&self, rng: &mut dyn RngCore) -> SliceApplication {
        let spec = &self.spec;
        let min_bandwidth = rng.gen_range(spec.min_bandwidth_bps.low..=spec.min_bandwidth_bps.high);
        // Keep max strictly above min; validate() guarantees this range is non-empty.
        let max_low = spec.max_bandwidth_bps.low.max(min_bandwidth + 1);
        let max_bandwidth = rng.gen_range(max_low..=spec.max_bandwidth_bps.high);
        let qos_class = rng.gen_range(spec.qos_class.low..=spec.qos_class.high);
        let delay_tolerance = rng.gen_range(spec.delay_tolerance_ms.low..=spec.delay_tolerance_ms.high);
        let client_weight = rng.gen_range(spec.client_weight.low..spec.client_weight.high);

        SliceApplication::new(
            min_bandwidth as f64,
            max_bandwidth as f64,
            qos_class,
            delay_tolerance,
            client_weight,
        )
    }
}
