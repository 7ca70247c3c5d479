//! Round-robin allocation.
//!
//! The simplest policy: every application gets the same nominal share of the
//! channel, capped at its own ceiling. Bandwidth left over by capped
//! applications is not handed to anyone else.

use crate::traits::*;
use rand::RngCore;

/// Equal-split allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin;

impl RoundRobin {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for RoundRobin {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        // Whole-bps split, as a channel scheduler would hand it out.
        let share = equal_share(total_bandwidth, apps.len()).floor();
        for app in apps.iter_mut() {
            app.allocated_bandwidth = app.max_bandwidth.min(share).max(0.0);
        }
    }

    fn name(&self) -> &str {
        "round_robin"
    }

    fn label(&self) -> &str {
        "Round Robin"
    }
}
