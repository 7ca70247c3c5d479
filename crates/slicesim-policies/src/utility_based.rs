//! Utility-based allocation.
//!
//! Utility of a slice is `qos_class / max_bandwidth`; each slice gets
//! `qos_class / sum(utility) * total`. The result is not bounded by the
//! channel or by any ceiling, which is why the policy is registered inactive
//! and left out of the default comparison.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct UtilityBased;

impl UtilityBased {
    pub fn new() -> Self {
        Self
    }
}

fn utility(app: &SliceApplication) -> f64 {
    if app.max_bandwidth <= 0.0 {
        return 0.0;
    }
    app.qos_class as f64 / app.max_bandwidth
}

impl AllocationPolicy for UtilityBased {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        let total_utility: f64 = apps.iter().map(utility).sum();
        if total_utility <= 0.0 || !total_utility.is_finite() {
            return;
        }
        for app in apps.iter_mut() {
            app.allocated_bandwidth = (app.qos_class as f64 / total_utility * total_bandwidth).max(0.0);
        }
    }

    fn name(&self) -> &str {
        "utility_based"
    }

    fn label(&self) -> &str {
        "Utility-Based"
    }
}
