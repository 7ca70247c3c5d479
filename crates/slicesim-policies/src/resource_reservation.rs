//! Resource reservation.
//!
//! Each application reserves exactly its SLA floor if the remaining channel
//! covers it. There are no partial grants: an application that does not fit
//! gets nothing, and later (smaller) ones may still fit.

use crate::traits::*;
use rand::RngCore;

#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceReservation;

impl ResourceReservation {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPolicy for ResourceReservation {
    fn allocate(&self, apps: &mut [SliceApplication], total_bandwidth: f64, _rng: &mut dyn RngCore) {
        let mut remaining = total_bandwidth;
        for app in apps.iter_mut() {
            let reserved = app.min_bandwidth.max(0.0);
            if remaining >= reserved {
                app.allocated_bandwidth = reserved;
                remaining -= reserved;
            }
        }
    }

    fn name(&self) -> &str {
        "resource_reservation"
    }

    fn label(&self) -> &str {
        "Resource Reservation"
    }
}
