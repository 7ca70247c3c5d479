//! Allocation policy trait definitions.
//!
//! All allocation policies implement the [`AllocationPolicy`] trait, which
//! receives the full set of slice applications sharing one channel and writes
//! each application's `allocated_bandwidth` in place.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Upper bound for `qos_class` once starvation avoidance starts boosting it.
pub const MAX_QOS_CLASS: u32 = 12;

/// Amount added to `qos_class` each time a slice is found waiting.
pub const STARVATION_BOOST: u32 = 2;

/// Distribution descriptor carried along for export. Never used for allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePattern {
    pub distribution: String,
    pub params: Vec<u64>,
}

impl Default for UsagePattern {
    fn default() -> Self {
        Self {
            distribution: "randint".to_string(),
            params: vec![4_000_000, 800_000_000],
        }
    }
}

/// One tenant's traffic demand on a shared channel.
///
/// All bandwidth quantities are in bits per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceApplication {
    /// Bandwidth needed to satisfy the slice's SLA.
    pub min_bandwidth: f64,
    /// Ceiling the slice can usefully consume.
    pub max_bandwidth: f64,
    /// Priority weight, higher is more important.
    pub qos_class: u32,
    /// Maximum acceptable scheduling delay in milliseconds.
    pub delay_tolerance: u32,
    /// Relative share of subscribed clients, in (0, 1).
    pub client_weight: f64,
    /// Output of the last allocation run.
    pub allocated_bandwidth: f64,
    pub usage_pattern: UsagePattern,
    /// Reserved; always zero for generated workloads.
    pub threshold: f64,
}

impl SliceApplication {
    pub fn new(
        min_bandwidth: f64,
        max_bandwidth: f64,
        qos_class: u32,
        delay_tolerance: u32,
        client_weight: f64,
    ) -> Self {
        Self {
            min_bandwidth,
            max_bandwidth,
            qos_class,
            delay_tolerance,
            client_weight,
            allocated_bandwidth: 0.0,
            usage_pattern: UsagePattern::default(),
            threshold: 0.0,
        }
    }

    /// Whether the current allocation meets the SLA floor.
    pub fn sla_met(&self) -> bool {
        self.allocated_bandwidth >= self.min_bandwidth
    }

    /// Draw an instantaneous demand uniformly from `[min_bandwidth, max_bandwidth]`.
    pub fn sample_demand(&self, rng: &mut dyn RngCore) -> f64 {
        if self.max_bandwidth <= self.min_bandwidth {
            return self.min_bandwidth;
        }
        rng.gen_range(self.min_bandwidth..=self.max_bandwidth)
    }

    /// Raise `qos_class` by `step`, saturating at `cap`.
    pub fn boost_qos(&mut self, step: u32, cap: u32) {
        self.qos_class = self.qos_class.saturating_add(step).min(cap.max(self.qos_class));
    }
}

/// The core allocation policy trait.
///
/// Implementors only provide [`allocate`](AllocationPolicy::allocate); callers
/// go through [`apply`](AllocationPolicy::apply), which clears any previous
/// allocation first.
pub trait AllocationPolicy: Send + Sync {
    /// Write `allocated_bandwidth` for every application, sharing `total_bandwidth`.
    ///
    /// Allocations start at zero. Implementations must never assign a negative
    /// value and must not fail on degenerate inputs.
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, rng: &mut dyn RngCore);

    /// Registry key, e.g. `round_robin`.
    fn name(&self) -> &str;

    /// Human-readable name for reports and charts.
    fn label(&self) -> &str {
        self.name()
    }

    /// Reset allocations and run the policy.
    ///
    /// `total_bandwidth` must be finite and non-negative; callers validate it
    /// up front. Any other value leaves every allocation at zero.
    fn apply(&self, apps: &mut [SliceApplication], total_bandwidth: f64, rng: &mut dyn RngCore) {
        reset_allocations(apps);
        if !total_bandwidth.is_finite() || total_bandwidth < 0.0 {
            return;
        }
        self.allocate(apps, total_bandwidth, rng);
    }
}

/// Set every application's allocation back to zero.
pub fn reset_allocations(apps: &mut [SliceApplication]) {
    for app in apps.iter_mut() {
        app.allocated_bandwidth = 0.0;
    }
}

/// Equal nominal share of the channel; zero when there is nothing to share.
pub fn equal_share(total_bandwidth: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    total_bandwidth / n as f64
}

/// Indices of `apps` sorted by `compare`, leaving the slice itself untouched.
pub fn sorted_indices<F>(apps: &[SliceApplication], mut compare: F) -> Vec<usize>
where
    F: FnMut(&SliceApplication, &SliceApplication) -> Ordering,
{
    let mut order: Vec<usize> = (0..apps.len()).collect();
    order.sort_by(|&a, &b| compare(&apps[a], &apps[b]));
    order
}

/// Greedy grant in the given order: each app takes `min(max_bandwidth, remaining)`.
///
/// Stops as soon as the budget is exhausted; later apps keep zero.
pub fn greedy_fill(apps: &mut [SliceApplication], order: &[usize], total_bandwidth: f64) {
    let mut remaining = total_bandwidth;
    for &idx in order {
        if remaining <= 0.0 {
            break;
        }
        let app = &mut apps[idx];
        let grant = app.max_bandwidth.min(remaining).max(0.0);
        app.allocated_bandwidth = grant;
        remaining -= grant;
    }
}

/// Share `total_bandwidth` proportionally to `weight(app) / sum(weights)`.
///
/// A non-positive or non-finite aggregate weight leaves every allocation at zero.
pub fn proportional_split<F>(apps: &mut [SliceApplication], total_bandwidth: f64, weight: F)
where
    F: Fn(&SliceApplication) -> f64,
{
    let total_weight: f64 = apps.iter().map(&weight).sum();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return;
    }
    for app in apps.iter_mut() {
        app.allocated_bandwidth = (weight(app) / total_weight * total_bandwidth).max(0.0);
    }
}
