//! Result export and comparative charts.
//!
//! Consumes a finished [`ScalingReport`] read-only: a pretty-printed JSON dump
//! of every record, and one interactive HTML chart per metric with one series
//! per policy against workload size.

use crate::harness::ScalingReport;
use crate::metrics::{metric_title, METRIC_NAMES};
use plotly::common::Mode;
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write every metrics record as JSON.
pub fn write_results_json(report: &ScalingReport, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    info!("Results written to {}", path.display());
    Ok(())
}

/// Build the chart for one metric.
pub fn metric_chart(report: &ScalingReport, metric: &str) -> Plot {
    let title = metric_title(metric);
    let mut plot = Plot::new();

    for series in &report.series {
        let values: Vec<f64> = series
            .records
            .iter()
            .map(|r| r.get(metric).unwrap_or(0.0))
            .collect();
        let trace = Scatter::new(report.workload_sizes.clone(), values)
            .name(&series.label)
            .mode(Mode::LinesMarkers);
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .title(format!("{} vs. Number of Applications (All Policies)", title).as_str())
        .x_axis(Axis::new().title("Number of Applications"))
        .y_axis(Axis::new().title(title.as_str()));
    plot.set_layout(layout);
    plot
}

/// Render one HTML chart per metric into `dir`, returning the written paths.
pub fn render_charts(report: &ScalingReport, dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(METRIC_NAMES.len());
    for metric in METRIC_NAMES {
        let path = dir.join(format!("all_policies_{}.html", metric));
        std::fs::write(&path, metric_chart(report, metric).to_html())?;
        written.push(path);
    }
    info!("{} charts written to {}", written.len(), dir.display());
    Ok(written)
}
