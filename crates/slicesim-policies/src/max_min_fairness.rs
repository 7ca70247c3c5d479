//! Max-min fairness allocation (single pass).
//!
//! Applications are visited from the smallest SLA floor upwards and each gets
//! `min(max_bandwidth, total / N)`. This is the one-pass approximation of
//! water-filling: slack from capped applications is not redistributed.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct MaxMinFairness;

impl MaxMinFairness {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for MaxMinFairness {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        let share = equal_share(total_bandwidth, apps.len());
        let order = sorted_indices(apps, |a, b| a.min_bandwidth.total_cmp(&b.min_bandwidth));
        for idx in order {
            let app = &mut apps[idx];
            app.allocated_bandwidth = app.max_bandwidth.min(share).max(0.0);
        }
    }

    fn name(&self) -> &str {
        "max_min_fairness"
    }

    fn label(&self) -> &str {
        "Max-Min Fairness"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{make_apps, test_rng};

    #[test]
    fn test_max_min_caps_at_ceiling() {
        let mut apps = make_apps(&[(1e6, 3e6), (2e6, 40e6), (1e6, 40e6)]);
        MaxMinFairness::new().apply(&mut apps, 30e6, &mut test_rng());
        assert_eq!(apps[0].allocated_bandwidth, 3e6);
        assert_eq!(apps[1].allocated_bandwidth, 10e6);
        assert_eq!(apps[2].allocated_bandwidth, 10e6);
    }
}
