//! First-come-first-served allocation.
//!
//! Applications are served in arrival (slice) order, each taking as much as it
//! can use until the channel runs dry.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstComeFirstServed;

impl FirstComeFirstServed {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for FirstComeFirstServed {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        let order: Vec<usize> = (0..apps.len()).collect();
        greedy_fill(apps, &order, total_bandwidth);
    }

    fn name(&self) -> &str {
        "first_come_first_served"
    }

    fn label(&self) -> &str {
        "First-Come First-Served"
    }
}
