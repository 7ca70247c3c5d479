//! SliceSim CLI — compare bandwidth allocation policies for network slices.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slicesim_core::config::SimConfig;
use slicesim_core::topology::{self, TopologySpec};
use slicesim_core::{export, harness, metrics, report};
use slicesim_policies::SliceApplication;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "slicesim",
    about = "Compare bandwidth allocation policies for network slices",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep workload sizes for every enabled policy.
    Scale {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated list of policy names (overrides the config).
        #[arg(short = 'P', long, value_delimiter = ',')]
        policies: Vec<String>,
        /// Output results to JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory for one HTML chart per metric.
        #[arg(long)]
        charts: Option<PathBuf>,
        /// Write the last generated workload to a YAML file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Run a single policy on one workload.
    Run {
        /// Allocation policy name.
        #[arg(short, long, default_value = "round_robin")]
        policy: String,
        #[command(flatten)]
        input: WorkloadArgs,
        /// Write the allocated workload to a YAML file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Compare policies on one identical workload.
    Compare {
        /// Comma-separated list of policy names.
        #[arg(short = 'P', long, value_delimiter = ',')]
        policies: Vec<String>,
        #[command(flatten)]
        input: WorkloadArgs,
    },
    /// Generate a base-station topology.
    GenTopology {
        /// Number of base stations.
        #[arg(long, default_value = "30")]
        stations: u32,
        /// Number of slices per station.
        #[arg(long, default_value = "1000")]
        slices: u32,
        /// Random seed for coordinates.
        #[arg(long)]
        seed: Option<u64>,
        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List available allocation policies.
    ListPolicies,
}

#[derive(clap::Args)]
struct WorkloadArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Replay a YAML workload snapshot instead of generating one.
    #[arg(short, long)]
    workload: Option<PathBuf>,
    /// Number of applications to generate.
    #[arg(short = 'n', long, default_value = "50")]
    apps: usize,
    /// Channel capacity in bps (overrides the config).
    #[arg(short, long)]
    total_bandwidth: Option<f64>,
    /// Random seed (overrides the config).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slicesim=info,slicesim_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scale {
            config,
            policies,
            output,
            charts,
            export: export_path,
        } => {
            let mut sim_config = load_config(config.as_deref());
            if !policies.is_empty() {
                sim_config.policies.enabled = policies;
                sim_config.validate().unwrap_or_else(|e| fail("Invalid policies", e));
            }

            let result = slicesim_core::run_scaling(&sim_config)
                .unwrap_or_else(|e| fail("Scaling run failed", e));

            for metric in metrics::METRIC_NAMES {
                println!("{}", metrics::format_comparison_table(&result, metric));
            }

            let output = output.or_else(|| sim_config.output.results_path.as_ref().map(PathBuf::from));
            if let Some(path) = output {
                if let Err(e) = report::write_results_json(&result, &path) {
                    warn!("Could not write results to {}: {}", path.display(), e);
                }
            }

            let charts = charts.or_else(|| sim_config.output.charts_dir.as_ref().map(PathBuf::from));
            if let Some(dir) = charts {
                if let Err(e) = report::render_charts(&result, &dir) {
                    warn!("Could not render charts into {}: {}", dir.display(), e);
                }
            }

            let export_path =
                export_path.or_else(|| sim_config.output.workload_path.as_ref().map(PathBuf::from));
            if let Some(path) = export_path {
                write_snapshot(&result.last_workload, &path);
            }
        }
        Commands::Run {
            policy,
            input,
            export: export_path,
        } => {
            let (sim_config, mut apps) = prepare_workload(&input);
            let algo = slicesim_policies::policy_by_name(&policy).unwrap_or_else(|| {
                error!(
                    "Unknown policy: {}. Available: {:?}",
                    policy,
                    slicesim_policies::available_policies()
                );
                std::process::exit(1);
            });

            let mut rng = seeded_rng(sim_config.simulation.seed);
            let record =
                harness::run_single(algo.as_ref(), &mut apps, sim_config.total_bandwidth(), &mut rng);
            println!("{}", metrics::format_table(algo.label(), &[apps.len()], &[record]));

            if let Some(path) = export_path {
                write_snapshot(&apps, &path);
            }
        }
        Commands::Compare { policies, input } => {
            let (sim_config, apps) = prepare_workload(&input);
            let names: Vec<&str> = if policies.is_empty() {
                sim_config.enabled_policies()
            } else {
                policies.iter().map(|s| s.as_str()).collect()
            };

            let results = harness::compare_policies(
                &apps,
                sim_config.total_bandwidth(),
                &names,
                sim_config.simulation.seed,
            )
            .unwrap_or_else(|e| fail("Comparison failed", e));

            for (_, label, record) in &results {
                println!("{}", metrics::format_table(label, &[apps.len()], &[*record]));
            }
        }
        Commands::GenTopology {
            stations,
            slices,
            seed,
            output,
        } => {
            let spec = TopologySpec {
                base_station_count: stations,
                num_slices: slices,
                ..TopologySpec::default()
            };
            let mut rng = seeded_rng(seed);
            let topo = topology::generate_topology(&spec, &mut rng)
                .unwrap_or_else(|e| fail("Error generating topology", e));
            topology::save_topology(&topo, &output)
                .unwrap_or_else(|e| fail("Error writing topology", e));
            info!(
                "Generated {} base stations to {}",
                topo.base_stations.len(),
                output.display()
            );
        }
        Commands::ListPolicies => {
            println!("Available allocation policies:");
            for entry in slicesim_policies::REGISTRY {
                let note = if entry.active { "" } else { " (inactive)" };
                println!("  - {}{}", entry.name, note);
            }
        }
    }
}

fn fail<E: std::fmt::Display>(context: &str, e: E) -> ! {
    error!("{}: {}", context, e);
    std::process::exit(1);
}

fn load_config(path: Option<&Path>) -> SimConfig {
    match path {
        Some(p) => SimConfig::from_file(p).unwrap_or_else(|e| fail("Error loading config", e)),
        None => SimConfig::default(),
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Resolve the config overrides and obtain a workload, loaded or generated.
fn prepare_workload(args: &WorkloadArgs) -> (SimConfig, Vec<SliceApplication>) {
    let mut sim_config = load_config(args.config.as_deref());
    if let Some(total) = args.total_bandwidth {
        sim_config.channel.total_bandwidth_bps = total;
    }
    if args.seed.is_some() {
        sim_config.simulation.seed = args.seed;
    }
    sim_config
        .validate()
        .unwrap_or_else(|e| fail("Invalid configuration", e));

    let apps = match &args.workload {
        Some(path) => {
            export::load_workload(path).unwrap_or_else(|e| fail("Error loading workload", e))
        }
        None => {
            let generator = slicesim_core::WorkloadGenerator::new(sim_config.workload.spec.clone())
                .unwrap_or_else(|e| fail("Invalid workload ranges", e));
            let mut rng = seeded_rng(sim_config.simulation.seed);
            generator
                .generate(args.apps, &mut rng)
                .unwrap_or_else(|e| fail("Error generating workload", e))
        }
    };
    if apps.is_empty() {
        fail("Error loading workload", "no slices found");
    }
    (sim_config, apps)
}

fn write_snapshot(apps: &[SliceApplication], path: &Path) {
    match export::save_workload(apps, path) {
        Ok(()) => info!("Workload of {} slices written to {}", apps.len(), path.display()),
        Err(e) => warn!("Could not export workload to {}: {}", path.display(), e),
    }
}
