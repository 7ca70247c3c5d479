/// Integration tests for workload snapshots, topology output and reports.
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slicesim_core::config::SimConfig;
use slicesim_core::topology::{generate_topology, save_topology, TopologySpec};
use slicesim_core::{export, report, run_scaling, WorkloadGenerator, WorkloadSpec, METRIC_NAMES};

#[test]
fn test_save_and_reload_workload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slice_data.yaml");
    let apps = WorkloadGenerator::new(WorkloadSpec::default())
        .unwrap()
        .generate(25, &mut ChaCha8Rng::seed_from_u64(11))
        .unwrap();

    export::save_workload(&apps, &path).unwrap();
    let reloaded = export::load_workload(&path).unwrap();

    assert_eq!(reloaded.len(), 25);
    for (a, b) in apps.iter().zip(&reloaded) {
        assert_eq!(a.min_bandwidth, b.min_bandwidth);
        assert_eq!(a.max_bandwidth, b.max_bandwidth);
        assert_eq!(a.qos_class, b.qos_class);
        assert_eq!(a.delay_tolerance, b.delay_tolerance);
        assert_eq!(b.allocated_bandwidth, 0.0);
    }
}

#[test]
fn test_export_to_missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("slice_data.yaml");
    let apps = vec![slicesim_policies::SliceApplication::new(1e6, 2e6, 1, 10, 0.05)];
    assert!(matches!(
        export::save_workload(&apps, &path),
        Err(export::ExportError::Io(_))
    ));
}

#[test]
fn test_load_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(export::load_workload(&dir.path().join("nope.yaml")).is_err());
}

#[test]
fn test_topology_written_as_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("base_stations.yaml");
    let spec = TopologySpec {
        base_station_count: 3,
        num_slices: 5,
        ..TopologySpec::default()
    };
    let topology = generate_topology(&spec, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    save_topology(&topology, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("base_stations:"));
    assert!(content.contains("slice_5: 0.2"));
}

#[test]
fn test_report_outputs() {
    let mut config = SimConfig::default();
    config.simulation.seed = Some(5);
    config.workload.sizes = vec![10, 20];
    config.policies.enabled = vec!["round_robin".to_string(), "hybrid_dynamic".to_string()];
    let result = run_scaling(&config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("results.json");
    report::write_results_json(&result, &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["series"].as_array().unwrap().len(), 2);
    assert_eq!(json["series"][1]["policy"], "hybrid_dynamic");

    let charts = report::render_charts(&result, &dir.path().join("plots")).unwrap();
    assert_eq!(charts.len(), METRIC_NAMES.len());
    assert!(charts.iter().all(|p| p.exists()));
}
