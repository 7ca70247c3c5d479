//! Built-in bandwidth allocation policies for SliceSim.
//!
//! This crate provides the [`AllocationPolicy`] trait, the [`SliceApplication`]
//! data entity, and the policies compared by the scaling harness:
//!
//! | Policy | Strategy | Caps at ceiling |
//! |--------|----------|-----------------|
//! | [`RoundRobin`] | Equal split | yes |
//! | [`PriorityBased`] | Greedy by QoS, then delay | yes |
//! | [`ProportionalFairness`] | Share by ceiling | no |
//! | [`MaxMinFairness`] | Equal split, smallest floor first | yes |
//! | [`WeightedFairQueueing`] | Share by QoS class | no |
//! | [`FirstComeFirstServed`] | Greedy in slice order | yes |
//! | [`LatencyAware`] | Equal split, tightest delay first | yes |
//! | [`ResourceReservation`] | SLA floor or nothing | yes |
//! | [`UtilityBased`] | Share by QoS over utility (inactive) | no |
//! | [`DynamicAdaptive`] | Sampled demand, greedy | yes |
//! | [`HybridDynamic`] | Slotted, starvation-avoiding | yes |

pub mod dynamic_adaptive;
pub mod first_come_first_served;
pub mod hybrid_dynamic;
pub mod latency_aware;
pub mod max_min_fairness;
pub mod priority_based;
pub mod proportional_fairness;
pub mod resource_reservation;
pub mod round_robin;
pub mod traits;
pub mod utility_based;
pub mod weighted_fair_queueing;

pub use dynamic_adaptive::DynamicAdaptive;
pub use first_come_first_served::FirstComeFirstServed;
pub use hybrid_dynamic::{HybridDynamic, HYBRID_TIME_SLOTS};
pub use latency_aware::LatencyAware;
pub use max_min_fairness::MaxMinFairness;
pub use priority_based::PriorityBased;
pub use proportional_fairness::ProportionalFairness;
pub use resource_reservation::ResourceReservation;
pub use round_robin::RoundRobin;
pub use traits::*;
pub use utility_based::UtilityBased;
pub use weighted_fair_queueing::WeightedFairQueueing;

/// A registered policy: its key and whether it takes part in default runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyEntry {
    pub name: &'static str,
    pub active: bool,
}

impl PolicyEntry {
    const fn active(name: &'static str) -> Self {
        Self { name, active: true }
    }

    const fn inactive(name: &'static str) -> Self {
        Self {
            name,
            active: false,
        }
    }
}

/// Every built-in policy, in report order.
pub const REGISTRY: &[PolicyEntry] = &[
    PolicyEntry::active("round_robin"),
    PolicyEntry::active("priority_based"),
    PolicyEntry::active("proportional_fairness"),
    PolicyEntry::active("max_min_fairness"),
    PolicyEntry::active("weighted_fair_queueing"),
    PolicyEntry::active("first_come_first_served"),
    PolicyEntry::active("latency_aware"),
    PolicyEntry::active("resource_reservation"),
    PolicyEntry::inactive("utility_based"),
    PolicyEntry::active("dynamic_adaptive"),
    PolicyEntry::active("hybrid_dynamic"),
];

/// Create an allocation policy by name.
pub fn policy_by_name(name: &str) -> Option<Box<dyn AllocationPolicy>> {
    match name {
        "round_robin" => Some(Box::new(RoundRobin::new())),
        "priority_based" => Some(Box::new(PriorityBased::new())),
        "proportional_fairness" => Some(Box::new(ProportionalFairness::new())),
        "max_min_fairness" => Some(Box::new(MaxMinFairness::new())),
        "weighted_fair_queueing" => Some(Box::new(WeightedFairQueueing::new())),
        "first_come_first_served" => Some(Box::new(FirstComeFirstServed::new())),
        "latency_aware" => Some(Box::new(LatencyAware::new())),
        "resource_reservation" => Some(Box::new(ResourceReservation::new())),
        "utility_based" => Some(Box::new(UtilityBased::new())),
        "dynamic_adaptive" => Some(Box::new(DynamicAdaptive::new())),
        "hybrid_dynamic" => Some(Box::new(HybridDynamic::new())),
        _ => None,
    }
}

/// List all available built-in policy names, active or not.
pub fn available_policies() -> Vec<&'static str> {
    REGISTRY.iter().map(|e| e.name).collect()
}

/// Policies included in a default comparison run.
pub fn default_policies() -> Vec<&'static str> {
    REGISTRY.iter().filter(|e| e.active).map(|e| e.name).collect()
}

/// Whether `name` is registered and active.
pub fn is_active(name: &str) -> bool {
    REGISTRY.iter().any(|e| e.name == name && e.active)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Helper to create applications from `(min, max)` bandwidth pairs.
    pub fn make_apps(bounds: &[(f64, f64)]) -> Vec<SliceApplication> {
        bounds
            .iter()
            .map(|&(min, max)| SliceApplication::new(min, max, 1, 100, 0.05))
            .collect()
    }

    pub fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_policy_by_name() {
        for name in available_policies() {
            let policy = policy_by_name(name).unwrap_or_else(|| panic!("Missing: {}", name));
            assert_eq!(policy.name(), name);
        }
        assert!(policy_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_registry_has_eleven_policies() {
        assert_eq!(available_policies().len(), 11);
    }

    #[test]
    fn test_utility_based_inactive_by_default() {
        assert!(!default_policies().contains(&"utility_based"));
        assert_eq!(default_policies().len(), 10);
        assert!(!is_active("utility_based"));
        assert!(is_active("hybrid_dynamic"));
    }

    #[test]
    fn test_apply_resets_previous_allocation() {
        let mut apps = make_apps(&[(1e6, 2e6), (1e6, 2e6)]);
        for app in apps.iter_mut() {
            app.allocated_bandwidth = 7e6;
        }
        ResourceReservation::new().apply(&mut apps, 1e6, &mut test_rng());
        assert_eq!(apps[0].allocated_bandwidth, 1e6);
        assert_eq!(apps[1].allocated_bandwidth, 0.0);
    }

    #[test]
    fn test_no_policy_assigns_negative_bandwidth() {
        let mut rng = test_rng();
        for name in available_policies() {
            let policy = policy_by_name(name).unwrap();
            for total in [0.0, 1e6, 5e9] {
                let mut apps = make_apps(&[(5e6, 20e6), (6e6, 25e6), (4e6, 15e6)]);
                policy.apply(&mut apps, total, &mut rng);
                assert!(
                    apps.iter().all(|a| a.allocated_bandwidth >= 0.0),
                    "{} assigned negative bandwidth for total {}",
                    name,
                    total
                );
            }
        }
    }

    #[test]
    fn test_invalid_total_allocates_nothing() {
        let mut rng = test_rng();
        for name in available_policies() {
            let policy = policy_by_name(name).unwrap();
            for total in [-5.0, f64::NAN, f64::INFINITY] {
                let mut apps = make_apps(&[(5e6, 20e6), (6e6, 25e6)]);
                apps[0].allocated_bandwidth = 3e6;
                policy.apply(&mut apps, total, &mut rng);
                assert!(
                    apps.iter().all(|a| a.allocated_bandwidth == 0.0),
                    "{} allocated for invalid total {}",
                    name,
                    total
                );
            }
        }
    }

    #[test]
    fn test_boost_qos_saturates() {
        let mut app = SliceApplication::new(1.0, 2.0, 11, 10, 0.05);
        app.boost_qos(STARVATION_BOOST, MAX_QOS_CLASS);
        assert_eq!(app.qos_class, MAX_QOS_CLASS);
        app.boost_qos(STARVATION_BOOST, MAX_QOS_CLASS);
        assert_eq!(app.qos_class, MAX_QOS_CLASS);
    }
}
