//! Dynamic adaptive allocation.
//!
//! Models instantaneous demand: each application draws a demand sample
//! between its floor and ceiling and is granted as much of it as the channel
//! still has, in slice order.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicAdaptive;

impl DynamicAdaptive {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for DynamicAdaptive {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, rng: &mut dyn RngCore) {
        let mut remaining = total_bandwidth;
        for app in apps.iter_mut() {
            if remaining <= 0.0 {
                break;
            }
            let demand = app.sample_demand(rng);
            let grant = demand.min(remaining).max(0.0);
            app.allocated_bandwidth = grant;
            remaining -= grant;
        }
    }

    fn name(&self) -> &str {
        "dynamic_adaptive"
    }

    fn label(&self) -> &str {
        "Dynamic Adaptive"
    }
}
