//! Metrics engine for allocation snapshots.
//!
//! Ten independent scoring functions over a finalized application set, plus
//! an aggregator that produces one [`MetricsRecord`] per run. Every function
//! resolves degenerate denominators (empty set, zero channel, zero weight)
//! to `0.0` instead of failing.

use crate::harness::ScalingReport;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use slicesim_policies::SliceApplication;

/// Upper bound (inclusive) of the random delay threshold in milliseconds.
pub const DELAY_THRESHOLD_MAX_MS: u32 = 500;

/// Metric names in report order.
pub const METRIC_NAMES: [&str; 10] = [
    "utilization",
    "fairness",
    "sla_satisfaction",
    "delay_satisfaction",
    "over_provisioning",
    "under_provisioning",
    "allocation_variance",
    "max_allocation_ratio",
    "client_saturation",
    "weighted_efficiency",
];

/// Scores for one (policy, workload size) run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub utilization: f64,
    pub fairness: f64,
    pub sla_satisfaction: f64,
    pub delay_satisfaction: f64,
    pub over_provisioning: f64,
    pub under_provisioning: f64,
    pub allocation_variance: f64,
    pub max_allocation_ratio: f64,
    pub client_saturation: f64,
    pub weighted_efficiency: f64,
}

impl MetricsRecord {
    /// Look a metric up by its fixed name.
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "utilization" => self.utilization,
            "fairness" => self.fairness,
            "sla_satisfaction" => self.sla_satisfaction,
            "delay_satisfaction" => self.delay_satisfaction,
            "over_provisioning" => self.over_provisioning,
            "under_provisioning" => self.under_provisioning,
            "allocation_variance" => self.allocation_variance,
            "max_allocation_ratio" => self.max_allocation_ratio,
            "client_saturation" => self.client_saturation,
            "weighted_efficiency" => self.weighted_efficiency,
            _ => return None,
        };
        Some(value)
    }

    /// `(name, value)` pairs in [`METRIC_NAMES`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        METRIC_NAMES
            .iter()
            .map(move |&name| (name, self.get(name).unwrap_or(0.0)))
    }
}

/// Human-readable title for a metric key, e.g. `sla_satisfaction` -> `Sla Satisfaction`.
pub fn metric_title(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}

fn fraction_where<F>(apps: &[SliceApplication], predicate: F) -> f64
where
    F: FnMut(&&SliceApplication) -> bool,
{
    ratio(
        apps.iter().filter(predicate).count() as f64,
        apps.len() as f64,
    )
}

fn total_allocated(apps: &[SliceApplication]) -> f64 {
    apps.iter().map(|a| a.allocated_bandwidth).sum()
}

/// Fraction of the channel handed out.
pub fn bandwidth_utilization(apps: &[SliceApplication], total_bandwidth: f64) -> f64 {
    ratio(total_allocated(apps), total_bandwidth)
}

/// Jain's fairness index: (sum(x_i))^2 / (n * sum(x_i^2)).
pub fn jain_fairness_index(apps: &[SliceApplication]) -> f64 {
    let n = apps.len() as f64;
    let sum = total_allocated(apps);
    let sum_sq: f64 = apps.iter().map(|a| a.allocated_bandwidth.powi(2)).sum();
    ratio(sum * sum, n * sum_sq)
}

/// Fraction of applications whose SLA floor is met.
pub fn sla_satisfaction(apps: &[SliceApplication]) -> f64 {
    fraction_where(apps, |a| a.sla_met())
}

/// Fraction of applications whose delay tolerance exceeds a random threshold.
///
/// The threshold is drawn independently per application from
/// `[0, DELAY_THRESHOLD_MAX_MS]`, so this is a stochastic proxy rather than a
/// deadline check.
pub fn delay_satisfaction(apps: &[SliceApplication], rng: &mut dyn RngCore) -> f64 {
    fraction_where(apps, |a| {
        a.delay_tolerance > rng.gen_range(0..=DELAY_THRESHOLD_MAX_MS)
    })
}

/// Fraction of applications allocated strictly more than their floor.
pub fn over_provisioning(apps: &[SliceApplication]) -> f64 {
    fraction_where(apps, |a| a.allocated_bandwidth > a.min_bandwidth)
}

/// Fraction of applications allocated strictly less than their floor.
pub fn under_provisioning(apps: &[SliceApplication]) -> f64 {
    fraction_where(apps, |a| a.allocated_bandwidth < a.min_bandwidth)
}

/// Population variance of allocations.
pub fn bandwidth_variance(apps: &[SliceApplication]) -> f64 {
    if apps.is_empty() {
        return 0.0;
    }
    let n = apps.len() as f64;
    let mean = total_allocated(apps) / n;
    apps.iter()
        .map(|a| (a.allocated_bandwidth - mean).powi(2))
        .sum::<f64>()
        / n
}

/// Largest single allocation as a fraction of the channel.
pub fn max_allocation_ratio(apps: &[SliceApplication], total_bandwidth: f64) -> f64 {
    let max_alloc = apps
        .iter()
        .map(|a| a.allocated_bandwidth)
        .fold(0.0_f64, f64::max);
    ratio(max_alloc, total_bandwidth)
}

fn saturation(app: &SliceApplication) -> f64 {
    ratio(app.allocated_bandwidth, app.max_bandwidth)
}

/// Mean of `allocated / max_bandwidth`.
pub fn client_saturation_index(apps: &[SliceApplication]) -> f64 {
    ratio(apps.iter().map(saturation).sum(), apps.len() as f64)
}

/// QoS-weighted mean saturation: sum(saturation * qos) / sum(qos).
pub fn weighted_efficiency(apps: &[SliceApplication]) -> f64 {
    let weighted_sum: f64 = apps
        .iter()
        .map(|a| saturation(a) * a.qos_class as f64)
        .sum();
    let total_weight: f64 = apps.iter().map(|a| a.qos_class as f64).sum();
    ratio(weighted_sum, total_weight)
}

/// Compute all ten metrics for a finalized allocation.
pub fn compute_metrics(
    apps: &[SliceApplication],
    total_bandwidth: f64,
    rng: &mut dyn RngCore,
) -> MetricsRecord {
    MetricsRecord {
        utilization: bandwidth_utilization(apps, total_bandwidth),
        fairness: jain_fairness_index(apps),
        sla_satisfaction: sla_satisfaction(apps),
        delay_satisfaction: delay_satisfaction(apps, rng),
        over_provisioning: over_provisioning(apps),
        under_provisioning: under_provisioning(apps),
        allocation_variance: bandwidth_variance(apps),
        max_allocation_ratio: max_allocation_ratio(apps, total_bandwidth),
        client_saturation: client_saturation_index(apps),
        weighted_efficiency: weighted_efficiency(apps),
    }
}

/// Format one policy's scaling series as a pretty-printed table string.
pub fn format_table(label: &str, sizes: &[usize], records: &[MetricsRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{:=<100}\n", format!("  {} Results  ", label)));
    out.push_str(&format!(
        "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>12} {:>8} {:>8} {:>8}\n",
        "Apps", "Util", "Jain", "SLA", "Delay", "Over", "Under", "Variance", "MaxRat", "Satur",
        "WEff"
    ));
    out.push_str(&format!("{:-<100}\n", ""));
    for (size, m) in sizes.iter().zip(records) {
        out.push_str(&format!(
            "{:>6} {:>8.4} {:>8.4} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>12.4e} {:>8.4} {:>8.4} {:>8.4}\n",
            size,
            m.utilization,
            m.fairness,
            m.sla_satisfaction,
            m.delay_satisfaction,
            m.over_provisioning,
            m.under_provisioning,
            m.allocation_variance,
            m.max_allocation_ratio,
            m.client_saturation,
            m.weighted_efficiency,
        ));
    }
    out.push_str(&format!("{:=<100}\n", ""));
    out
}

/// Format one metric across every policy and workload size.
pub fn format_comparison_table(report: &ScalingReport, metric: &str) -> String {
    if report.series.is_empty() {
        return String::from("No results to compare.\n");
    }

    let width = 26 + 12 * report.workload_sizes.len();
    let mut out = String::new();
    out.push_str(&format!(
        "\n{:=<width$}\n",
        format!("  {} vs. Number of Applications  ", metric_title(metric)),
        width = width
    ));
    out.push_str(&format!("{:<26}", "Policy"));
    for size in &report.workload_sizes {
        out.push_str(&format!("{:>12}", size));
    }
    out.push('\n');
    out.push_str(&format!("{:-<width$}\n", "", width = width));

    for series in &report.series {
        out.push_str(&format!("{:<26}", series.label));
        for record in &series.records {
            out.push_str(&format!("{:>12.4}", record.get(metric).unwrap_or(0.0)));
        }
        out.push('\n');
    }
    out.push_str(&format!("{:=<width$}\n", "", width = width));
    out
}
