//! Hybrid dynamic allocation with starvation avoidance.
//!
//! Runs a bounded discrete-time simulation over the whole application set.
//! In every slot each application samples a demand; when the channel cannot
//! cover the sample the application is held to its SLA floor instead. Any
//! application that gets less than it asked for is considered waiting and has
//! its QoS class raised, and the service order for the next slot is
//! recomputed from the boosted classes, breaking ties by how often each
//! application has waited. Later slots therefore favour the
//! slices starved in earlier ones.
//!
//! The channel budget is shared by all slots of one invocation and is not
//! refilled between slots. Once it is gone, every application that has
//! nothing allocated is boosted at the start of each remaining slot.

use crate::traits::*;
use rand::RngCore;

/// Number of time slots simulated per invocation.
pub const HYBRID_TIME_SLOTS: usize = 100;

/// Starvation-avoiding hybrid of priority and dynamic allocation.
#[derive(Debug, Clone, Copy)]
pub struct HybridDynamic {
    /// Slots simulated per invocation.
    time_slots: usize,
    /// QoS increment applied to waiting applications.
    boost: u32,
    /// QoS ceiling for boosted applications.
    qos_cap: u32,
}

impl HybridDynamic {
    pub fn new() -> Self {
        Self {
            time_slots: HYBRID_TIME_SLOTS,
            boost: STARVATION_BOOST,
            qos_cap: MAX_QOS_CLASS,
        }
    }

    pub fn with_params(time_slots: usize, boost: u32, qos_cap: u32) -> Self {
        Self {
            time_slots,
            boost,
            qos_cap,
        }
    }

    /// Service order for the next slot: highest QoS first, then the slice with
    /// the least wait budget left. Stable on full ties.
    fn service_order(
        apps: &[SliceApplication],
        wait_budget: &[i64],
        order: &[usize],
    ) -> Vec<usize> {
        let mut next = order.to_vec();
        next.sort_by(|&a, &b| {
            apps[b]
                .qos_class
                .cmp(&apps[a].qos_class)
                .then(wait_budget[a].cmp(&wait_budget[b]))
        });
        next
    }
}

impl Default for HybridDynamic {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationPolicy for HybridDynamic {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, rng: &mut dyn RngCore) {
        let mut remaining = total_bandwidth;
        // Per-application wait counters, indexed by position in `apps`.
        let mut wait_budget: Vec<i64> = apps.iter().map(|a| a.delay_tolerance as i64).collect();
        let mut order: Vec<usize> = (0..apps.len()).collect();

        for _slot in 0..self.time_slots {
            for &idx in &order {
                if remaining <= 0.0 {
                    for app in apps.iter_mut().filter(|a| a.allocated_bandwidth == 0.0) {
                        app.boost_qos(self.boost, self.qos_cap);
                    }
                    break;
                }

                let app = &mut apps[idx];
                let demand = app.sample_demand(rng);
                let grant = if demand > remaining {
                    app.min_bandwidth.min(remaining)
                } else {
                    demand.min(remaining)
                }
                .max(0.0);

                app.allocated_bandwidth = grant;
                remaining -= grant;

                if grant < demand {
                    wait_budget[idx] -= 1;
                    app.boost_qos(self.boost, self.qos_cap);
                }
            }

            order = Self::service_order(apps, &wait_budget, &order);
        }
    }

    fn name(&self) -> &str {
        "hybrid_dynamic"
    }

    fn label(&self) -> &str {
        "Hybrid Dynamic"
    }
}
