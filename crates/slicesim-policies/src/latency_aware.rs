//! Latency-aware allocation.
//!
//! Visits applications from the tightest delay tolerance upwards. The ordering
//! only affects iteration; every application still gets the capped equal share.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct LatencyAware;

impl LatencyAware {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for LatencyAware {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        let share = equal_share(total_bandwidth, apps.len());
        let order = sorted_indices(apps, |a, b| a.delay_tolerance.cmp(&b.delay_tolerance));
        for idx in order {
            let app = &mut apps[idx];
            app.allocated_bandwidth = app.max_bandwidth.min(share).max(0.0);
        }
    }

    fn name(&self) -> &str {
        "latency_aware"
    }

    fn label(&self) -> &str {
        "Latency-Aware"
    }
}
