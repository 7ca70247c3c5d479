//! Priority-based allocation.
//!
//! Applications are served strictly by QoS class (highest first), with the
//! tighter delay tolerance winning ties. Each one greedily takes up to its
//! ceiling until the channel is exhausted.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityBased;

impl PriorityBased {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for PriorityBased {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        let order = sorted_indices(apps, |a, b| {
            b.qos_class
                .cmp(&a.qos_class)
                .then(a.delay_tolerance.cmp(&b.delay_tolerance))
        });
        greedy_fill(apps, &order, total_bandwidth);
    }

    fn name(&self) -> &str {
        "priority_based"
    }

    fn label(&self) -> &str {
        "Priority-Based"
    }
}
