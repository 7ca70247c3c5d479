//! Proportional fairness allocation.
//!
//! Each application's share of the channel is proportional to its ceiling
//! relative to the total requested ceiling. Shares are not capped, so the
//! whole channel is always handed out.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProportionalFairness;

impl ProportionalFairness {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for ProportionalFairness {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        proportional_split(apps, total_bandwidth, |app| app.max_bandwidth);
    }

    fn name(&self) -> &str {
        "proportional_fairness"
    }

    fn label(&self) -> &str {
        "Proportional Fairness"
    }
}
