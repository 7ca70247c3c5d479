//! Weighted fair queueing.
//!
//! Shares the channel proportionally to each application's QoS class.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedFairQueueing;

impl WeightedFairQueueing {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for WeightedFairQueueing {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        proportional_split(apps, total_bandwidth, |app| app.qos_class as f64);
    }

    fn name(&self) -> &str {
        "weighted_fair_queueing"
    }

    fn label(&self) -> &str {
        "Weighted Fair Queueing"
    }
}
