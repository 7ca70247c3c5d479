/// Integration tests for allocation policies against generated workloads.
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slicesim_core::metrics;
use slicesim_core::{compute_metrics, WorkloadGenerator, WorkloadSpec};
use slicesim_policies::*;

fn generated(n: usize, seed: u64) -> Vec<SliceApplication> {
    WorkloadGenerator::new(WorkloadSpec::default())
        .unwrap()
        .generate(n, &mut ChaCha8Rng::seed_from_u64(seed))
        .unwrap()
}

fn three_slices() -> Vec<SliceApplication> {
    vec![
        SliceApplication::new(5e6, 20e6, 3, 100, 0.05),
        SliceApplication::new(6e6, 25e6, 2, 200, 0.05),
        SliceApplication::new(4e6, 15e6, 1, 300, 0.05),
    ]
}

const CHANNELS: [f64; 4] = [0.0, 1e8, 5e9, 5e10];

#[test]
fn test_every_policy_non_negative() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for name in available_policies() {
        let policy = policy_by_name(name).unwrap();
        for (i, &total) in CHANNELS.iter().enumerate() {
            let mut apps = generated(200, i as u64);
            policy.apply(&mut apps, total, &mut rng);
            assert!(
                apps.iter().all(|a| a.allocated_bandwidth >= 0.0),
                "{} produced a negative allocation at total {}",
                name,
                total
            );
        }
    }
}

#[test]
fn test_equal_share_policies_respect_ceiling() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for policy in [
        Box::new(RoundRobin::new()) as Box<dyn AllocationPolicy>,
        Box::new(MaxMinFairness::new()),
    ] {
        for (i, &total) in CHANNELS.iter().enumerate() {
            let mut apps = generated(100, 10 + i as u64);
            policy.apply(&mut apps, total, &mut rng);
            assert!(
                apps.iter().all(|a| a.allocated_bandwidth <= a.max_bandwidth),
                "{} exceeded a ceiling at total {}",
                policy.name(),
                total
            );
        }
    }
}

#[test]
fn test_reservation_grants_exact_floor() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for &total in &CHANNELS {
        let mut apps = generated(500, 4);
        ResourceReservation::new().apply(&mut apps, total, &mut rng);
        let sum: f64 = apps.iter().map(|a| a.allocated_bandwidth).sum();
        assert!(sum <= total);
        for app in apps.iter().filter(|a| a.allocated_bandwidth != 0.0) {
            assert_eq!(app.allocated_bandwidth, app.min_bandwidth);
        }
    }
}

#[test]
fn test_proportional_fairness_fills_channel() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for &total in &CHANNELS {
        let mut apps = generated(300, 5);
        ProportionalFairness::new().apply(&mut apps, total, &mut rng);
        let sum: f64 = apps.iter().map(|a| a.allocated_bandwidth).sum();
        assert!((sum - total).abs() <= total * 1e-9 + 1e-6);
    }
}

#[test]
fn test_jain_in_unit_interval_for_all_policies() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for name in available_policies() {
        let policy = policy_by_name(name).unwrap();
        let mut apps = generated(150, 6);
        policy.apply(&mut apps, 1e9, &mut rng);
        let j = metrics::jain_fairness_index(&apps);
        assert!((0.0..=1.0 + 1e-12).contains(&j), "{}: jain {}", name, j);
    }
}

#[test]
fn test_weighted_efficiency_bounded_for_capping_policies() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    for name in [
        "round_robin",
        "priority_based",
        "max_min_fairness",
        "first_come_first_served",
        "latency_aware",
        "resource_reservation",
        "dynamic_adaptive",
        "hybrid_dynamic",
    ] {
        let policy = policy_by_name(name).unwrap();
        for &total in &CHANNELS {
            let mut apps = generated(150, 7);
            policy.apply(&mut apps, total, &mut rng);
            assert!(
                apps.iter().all(|a| a.allocated_bandwidth <= a.max_bandwidth),
                "{} exceeded a ceiling at total {}",
                name,
                total
            );
            let w = metrics::weighted_efficiency(&apps);
            assert!((0.0..=1.0 + 1e-12).contains(&w), "{}: efficiency {}", name, w);
        }
    }
}

#[test]
fn test_hybrid_qos_monotone_and_capped() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut apps = generated(400, 8);
    let initial: Vec<u32> = apps.iter().map(|a| a.qos_class).collect();
    HybridDynamic::new().apply(&mut apps, 1e9, &mut rng);
    for (app, before) in apps.iter().zip(initial) {
        assert!(app.qos_class >= before);
        assert!(app.qos_class <= MAX_QOS_CLASS);
    }
}

#[test]
fn test_round_robin_three_slice_scenario() {
    let mut apps = three_slices();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    RoundRobin::new().apply(&mut apps, 3e7, &mut rng);
    let allocations: Vec<f64> = apps.iter().map(|a| a.allocated_bandwidth).collect();
    assert_eq!(allocations, vec![1e7, 1e7, 1e7]);

    let record = compute_metrics(&apps, 3e7, &mut rng);
    assert_eq!(record.utilization, 1.0);
    assert_eq!(record.sla_satisfaction, 1.0);
    assert!((record.fairness - 1.0).abs() < 1e-12);
}

#[test]
fn test_reservation_zero_channel_scenario() {
    let mut apps = vec![SliceApplication::new(1e6, 1e6, 1, 100, 0.05)];
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    ResourceReservation::new().apply(&mut apps, 0.0, &mut rng);
    assert_eq!(apps[0].allocated_bandwidth, 0.0);

    let record = compute_metrics(&apps, 0.0, &mut rng);
    assert_eq!(record.sla_satisfaction, 0.0);
    assert_eq!(record.utilization, 0.0);
    assert_eq!(record.max_allocation_ratio, 0.0);
    assert_eq!(record.fairness, 0.0);
}

#[test]
fn test_single_application_every_policy() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    for name in available_policies() {
        let policy = policy_by_name(name).unwrap();
        let mut apps = vec![SliceApplication::new(2e6, 8e6, 2, 50, 0.05)];
        policy.apply(&mut apps, 1e7, &mut rng);
        let record = compute_metrics(&apps, 1e7, &mut rng);
        assert_eq!(record.allocation_variance, 0.0, "{}", name);
        assert!(record.utilization >= 0.0, "{}", name);
    }
}
