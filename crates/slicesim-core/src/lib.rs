//! SliceSim — bandwidth allocation comparison for network slices.
//!
//! This crate drives the allocation policies from `slicesim-policies` through
//! synthetic workloads of increasing size and scores every snapshot with a
//! fixed battery of fairness, utilization and SLA metrics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌──────────────┐
//! │ Workload │────▶│  Scaling  │────▶│   Metrics    │
//! │Generator │     │  Harness  │     │    Engine    │
//! └──────────┘     └─────┬─────┘     └──────┬───────┘
//!                        │                  │
//!                ┌───────┴───────┐   ┌──────┴───────┐
//!                │    Policy     │   │ Report/Export│
//!                │ (Allocation)  │   │ (JSON, HTML, │
//!                └───────────────┘   │    YAML)     │
//!                                    └──────────────┘
//! ```

pub mod config;
pub mod export;
pub mod harness;
pub mod metrics;
pub mod report;
pub mod topology;
pub mod workload;

// Re-export key types for convenience.
pub use config::SimConfig;
pub use export::{load_workload, save_workload};
pub use harness::{compare_policies, run_single, HarnessError, ScalingHarness, ScalingReport};
pub use metrics::{compute_metrics, MetricsRecord, METRIC_NAMES};
pub use workload::{WorkloadGenerator, WorkloadSpec};

/// Run a complete scaling sweep with the policies enabled in `config`.
pub fn run_scaling(config: &SimConfig) -> Result<ScalingReport, HarnessError> {
    let harness = ScalingHarness::new(config)?;
    harness.run(&config.enabled_policies())
}
