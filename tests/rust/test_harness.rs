/// Integration tests for the scaling harness.
use slicesim_core::config::SimConfig;
use slicesim_core::metrics;
use slicesim_core::{compare_policies, run_scaling, HarnessError, ScalingHarness, METRIC_NAMES};
use slicesim_policies::{default_policies, SliceApplication};

fn small_config() -> SimConfig {
    SimConfig::from_str(
        r#"
[simulation]
name = "harness-test"
seed = 42

[channel]
total_bandwidth_bps = 1e9

[workload]
sizes = [10, 50, 100]
"#,
    )
    .unwrap()
}

#[test]
fn test_full_sweep_default_policies() {
    let config = small_config();
    let report = run_scaling(&config).unwrap();

    assert_eq!(report.workload_sizes, vec![10, 50, 100]);
    assert_eq!(report.series.len(), default_policies().len());
    for (series, name) in report.series.iter().zip(default_policies()) {
        assert_eq!(series.policy, name);
        assert_eq!(series.records.len(), 3);
        for record in &series.records {
            assert!(record.fairness >= 0.0 && record.fairness <= 1.0 + 1e-12);
            assert!(record.sla_satisfaction >= 0.0 && record.sla_satisfaction <= 1.0);
            assert!(record.allocation_variance >= 0.0);
        }
    }
    assert_eq!(report.last_workload.len(), 100);
}

#[test]
fn test_sweep_reproducible_with_seed() {
    let config = small_config();
    let a = run_scaling(&config).unwrap();
    let b = run_scaling(&config).unwrap();
    for (sa, sb) in a.series.iter().zip(&b.series) {
        assert_eq!(sa.records, sb.records, "{} differs between runs", sa.policy);
    }
}

#[test]
fn test_scarcity_hurts_sla() {
    let mut config = small_config();
    config.workload.sizes = vec![1000];
    let harness = ScalingHarness::new(&config).unwrap();
    let report = harness.run(&["round_robin"]).unwrap();
    // 1 Gbps over 1000 slices is 1 Mbps each, below every 5 Mbps floor.
    let sla = report.metric_series("round_robin", "sla_satisfaction").unwrap();
    assert_eq!(sla, vec![0.0]);
}

#[test]
fn test_zero_bandwidth_sweep_degrades_gracefully() {
    let mut config = small_config();
    config.channel.total_bandwidth_bps = 0.0;
    let report = run_scaling(&config).unwrap();
    for series in &report.series {
        for record in &series.records {
            assert_eq!(record.utilization, 0.0);
            assert_eq!(record.max_allocation_ratio, 0.0);
        }
    }
}

#[test]
fn test_unknown_policy_in_sweep() {
    let harness = ScalingHarness::new(&small_config()).unwrap();
    assert!(matches!(
        harness.run(&["round_robin", "nope"]),
        Err(HarnessError::UnknownPolicy(_))
    ));
}

#[test]
fn test_compare_on_identical_workload() {
    let apps = vec![
        SliceApplication::new(5e6, 20e6, 3, 100, 0.05),
        SliceApplication::new(6e6, 25e6, 2, 200, 0.05),
        SliceApplication::new(4e6, 15e6, 1, 300, 0.05),
    ];
    let results = compare_policies(
        &apps,
        3e7,
        &["round_robin", "proportional_fairness", "resource_reservation"],
        Some(3),
    )
    .unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].2.utilization, 1.0);
    assert!((results[1].2.utilization - 1.0).abs() < 1e-12);
    // Reservation hands out 5 + 6 + 4 Mbps.
    assert!((results[2].2.utilization - 0.5).abs() < 1e-12);
    assert_eq!(results[2].2.over_provisioning, 0.0);
}

#[test]
fn test_compare_rejects_empty_workload() {
    assert!(compare_policies(&[], 1e9, &["round_robin"], None).is_err());
}

#[test]
fn test_comparison_tables_render() {
    let report = run_scaling(&small_config()).unwrap();
    for metric in METRIC_NAMES {
        let table = metrics::format_comparison_table(&report, metric);
        assert!(table.contains("Round Robin"));
        assert!(table.contains("Hybrid Dynamic"));
    }
}
