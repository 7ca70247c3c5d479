//! Scaling harness.
//!
//! For every requested workload size and every selected policy, generates a
//! fresh workload, applies the policy, and scores the result. Each run owns
//! its workload and its random source, so no state crosses runs.

use crate::config::SimConfig;
use crate::metrics::{compute_metrics, MetricsRecord};
use crate::workload::{WorkloadError, WorkloadGenerator};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use slicesim_policies::{AllocationPolicy, SliceApplication};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
    #[error("Workload generation failed: {0}")]
    Workload(#[from] WorkloadError),
    #[error("Total bandwidth must be a finite value >= 0, got {0}")]
    InvalidBandwidth(f64),
}

/// One policy's metrics, index-aligned with the report's workload sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySeries {
    pub policy: String,
    pub label: String,
    pub records: Vec<MetricsRecord>,
}

/// Result of a scaling sweep: policy name to ordered metrics records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingReport {
    pub name: String,
    pub total_bandwidth: f64,
    pub workload_sizes: Vec<usize>,
    pub series: Vec<PolicySeries>,
    /// Workload of the final run, kept for export.
    #[serde(skip)]
    pub last_workload: Vec<SliceApplication>,
}

impl ScalingReport {
    /// Records for one policy, if it took part.
    pub fn get(&self, policy: &str) -> Option<&[MetricsRecord]> {
        self.series
            .iter()
            .find(|s| s.policy == policy)
            .map(|s| s.records.as_slice())
    }

    /// One metric's values for one policy, in workload-size order.
    pub fn metric_series(&self, policy: &str, metric: &str) -> Option<Vec<f64>> {
        let records = self.get(policy)?;
        records.iter().map(|r| r.get(metric)).collect()
    }
}

/// Derive a per-run seed so that every (policy, size) pair draws from its own stream.
fn run_seed(base: u64, policy_index: usize, size_index: usize) -> u64 {
    base ^ (((policy_index as u64) << 32) | size_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn run_rng(seed: Option<u64>, policy_index: usize, size_index: usize) -> ChaCha8Rng {
    match seed {
        Some(base) => ChaCha8Rng::seed_from_u64(run_seed(base, policy_index, size_index)),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn check_bandwidth(total_bandwidth: f64) -> Result<(), HarnessError> {
    if !total_bandwidth.is_finite() || total_bandwidth < 0.0 {
        return Err(HarnessError::InvalidBandwidth(total_bandwidth));
    }
    if total_bandwidth == 0.0 {
        warn!("total bandwidth is zero; every ratio metric will fall back to 0");
    }
    Ok(())
}

fn resolve(name: &str) -> Result<Box<dyn AllocationPolicy>, HarnessError> {
    slicesim_policies::policy_by_name(name).ok_or_else(|| HarnessError::UnknownPolicy(name.into()))
}

/// Apply one policy to one owned workload and score it.
pub fn run_single(
    policy: &dyn AllocationPolicy,
    apps: &mut [SliceApplication],
    total_bandwidth: f64,
    rng: &mut dyn RngCore,
) -> MetricsRecord {
    policy.apply(apps, total_bandwidth, rng);
    compute_metrics(apps, total_bandwidth, rng)
}

/// Run several policies on clones of one workload.
///
/// Unlike the scaling sweep, every policy sees identical inputs. Returns
/// `(policy, label, record)` in the order given.
pub fn compare_policies(
    apps: &[SliceApplication],
    total_bandwidth: f64,
    names: &[&str],
    seed: Option<u64>,
) -> Result<Vec<(String, String, MetricsRecord)>, HarnessError> {
    check_bandwidth(total_bandwidth)?;
    if apps.is_empty() {
        return Err(WorkloadError::EmptyWorkload.into());
    }
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let policy = resolve(name)?;
            let mut owned = apps.to_vec();
            let mut rng = run_rng(seed, i, 0);
            let record = run_single(policy.as_ref(), &mut owned, total_bandwidth, &mut rng);
            Ok((policy.name().to_string(), policy.label().to_string(), record))
        })
        .collect()
}

/// Drives workload generation, allocation and scoring across workload sizes.
#[derive(Debug, Clone)]
pub struct ScalingHarness {
    name: String,
    generator: WorkloadGenerator,
    total_bandwidth: f64,
    sizes: Vec<usize>,
    seed: Option<u64>,
}

impl ScalingHarness {
    pub fn new(config: &SimConfig) -> Result<Self, HarnessError> {
        check_bandwidth(config.total_bandwidth())?;
        let generator = WorkloadGenerator::new(config.workload.spec.clone())?;
        if config.workload.sizes.contains(&0) {
            return Err(WorkloadError::EmptyWorkload.into());
        }
        Ok(Self {
            name: config.simulation.name.clone(),
            generator,
            total_bandwidth: config.total_bandwidth(),
            sizes: config.workload.sizes.clone(),
            seed: config.simulation.seed,
        })
    }

    pub fn workload_sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn total_bandwidth(&self) -> f64 {
        self.total_bandwidth
    }

    pub fn generator(&self) -> &WorkloadGenerator {
        &self.generator
    }

    /// Run the sweep for the given policies, in the given order.
    pub fn run(&self, policies: &[&str]) -> Result<ScalingReport, HarnessError> {
        let resolved = policies
            .iter()
            .map(|name| resolve(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut series = Vec::with_capacity(resolved.len());
        let mut last_workload = Vec::new();

        for (policy_index, policy) in resolved.iter().enumerate() {
            info!("Running simulation for {}...", policy.label());
            let mut records = Vec::with_capacity(self.sizes.len());

            for (size_index, &size) in self.sizes.iter().enumerate() {
                let mut rng = run_rng(self.seed, policy_index, size_index);
                let mut apps = self.generator.generate(size, &mut rng)?;
                let record =
                    run_single(policy.as_ref(), &mut apps, self.total_bandwidth, &mut rng);
                debug!(
                    policy = policy.name(),
                    apps = size,
                    utilization = record.utilization,
                    fairness = record.fairness,
                    sla = record.sla_satisfaction,
                    "run complete"
                );
                records.push(record);
                last_workload = apps;
            }

            series.push(PolicySeries {
                policy: policy.name().to_string(),
                label: policy.label().to_string(),
                records,
            });
        }

        Ok(ScalingReport {
            name: self.name.clone(),
            total_bandwidth: self.total_bandwidth,
            workload_sizes: self.sizes.clone(),
            series,
            last_workload,
        })
    }
}
