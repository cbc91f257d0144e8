//! Comparison charts for web API runtime benchmarks.
//!
//! This crate turns the raw output of a load-testing run into charts:
//! throughput and latency bar charts from JSON reports, and CPU and memory
//! line charts from container-stats samples.
//!
//! # Quick Start
//!
//! ```no_run
//! use webapi_bench_charts::{run, ChartsConfig};
//!
//! // Read results/raw, write results/charts
//! let report = run(&ChartsConfig::default())?;
//!
//! for chart in &report.charts {
//!     println!("wrote {}", chart.display());
//! }
//! # Ok::<(), webapi_bench_charts::ChartError>(())
//! ```
//!
//! # Modules
//!
//! - [`io`] - File discovery and loading
//! - [`extract`] - Metric extraction from JSON reports
//! - [`resource`] - Container-stats sample parsing
//! - [`chart`] - Bar and line chart rendering
//! - [`palette`] - Per-runtime colours
//! - [`summary`] - Markdown summary of the extracted metrics

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod palette;
pub mod resource;
pub mod result;
pub mod summary;

pub use chart::{BarChart, LineChart};
pub use config::ChartsConfig;
pub use error::{ChartError, Result};
pub use palette::ColorMap;
pub use result::{Metrics, ResourceSample, ResourceSeries, ResultEntry};

use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of one chart run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Directory the charts were written to.
    pub output_dir: PathBuf,
    /// Every chart written, in order.
    pub charts: Vec<PathBuf>,
    /// Report entries in discovery order.
    pub entries: Vec<ResultEntry>,
    /// Resource series in discovery order.
    pub resources: Vec<ResourceSeries>,
}

/// Load all results from the configured input directory.
///
/// # Errors
///
/// Returns a [`ChartError`] if a file cannot be read or a report is not
/// valid JSON.
pub fn load_results(config: &ChartsConfig) -> Result<(Vec<ResultEntry>, Vec<ResourceSeries>)> {
    let found = io::discover(&config.input_dir, &config.resource_suffix)?;
    debug!(
        reports = found.reports.len(),
        resources = found.resources.len(),
        input_dir = %config.input_dir.display(),
        "discovered result files"
    );

    let entries = found
        .reports
        .iter()
        .map(|path| io::read_report(path))
        .collect::<Result<Vec<_>>>()?;

    let resources = found
        .resources
        .iter()
        .map(|path| io::read_resource(path, &config.resource_suffix))
        .collect::<Result<Vec<_>>>()?;

    Ok((entries, resources))
}

/// Render every chart for already loaded results.
///
/// The three bar charts are always written. The CPU and memory charts are
/// written only when at least one resource series exists.
///
/// # Errors
///
/// Returns a [`ChartError`] if the output directory cannot be created or
/// a chart cannot be written.
pub fn render_charts(
    config: &ChartsConfig,
    entries: Vec<ResultEntry>,
    resources: Vec<ResourceSeries>,
) -> Result<RunReport> {
    io::ensure_output_dir(&config.output_dir)?;

    let colors = ColorMap::from_labels(
        entries
            .iter()
            .map(|e| e.label.as_str())
            .chain(resources.iter().map(|r| r.label.as_str())),
    );
    let size = (config.width, config.height);
    let mut charts = Vec::new();

    for kind in BarChart::ALL {
        let path = config.output_dir.join(kind.file_name());
        chart::draw_bar_chart(&path, kind, &kind.bars(&entries), &colors, size)?;
        debug!(path = %path.display(), "wrote bar chart");
        charts.push(path);
    }

    if !resources.is_empty() {
        for kind in LineChart::ALL {
            let path = config.output_dir.join(kind.file_name());
            chart::draw_line_chart(&path, kind, &kind.series(&resources), &colors, size)?;
            debug!(path = %path.display(), "wrote line chart");
            charts.push(path);
        }
    }

    info!(
        charts = charts.len(),
        reports = entries.len(),
        resources = resources.len(),
        "chart run complete"
    );

    Ok(RunReport {
        output_dir: config.output_dir.clone(),
        charts,
        entries,
        resources,
    })
}

/// Load results and render all charts.
///
/// This is the canonical entrypoint: discovery, extraction, parsing and
/// rendering in one pass.
///
/// # Errors
///
/// Returns a [`ChartError`] on any fatal input or output failure.
pub fn run(config: &ChartsConfig) -> Result<RunReport> {
    let (entries, resources) = load_results(config)?;
    render_charts(config, entries, resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_charts_without_resources() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartsConfig::default().with_output_dir(dir.path().join("charts"));

        let report = render_charts(&config, Vec::new(), Vec::new()).unwrap();
        assert_eq!(report.charts.len(), 3);
        assert!(report.charts.iter().all(|p| p.exists()));
        assert!(!dir.path().join("charts").join("webapi_cpu.svg").exists());
    }

    #[test]
    fn test_render_charts_with_resources() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartsConfig::default().with_output_dir(dir.path());
        let resources = vec![ResourceSeries::new(
            "rust",
            vec![ResourceSample {
                cpu_percent: 5.0,
                memory_mb: 12.0,
            }],
        )];

        let report = render_charts(&config, Vec::new(), resources).unwrap();
        let names: Vec<_> = report
            .charts
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "webapi_rps.svg",
                "webapi_latency_mean.svg",
                "webapi_latency_p99.svg",
                "webapi_cpu.svg",
                "webapi_memory.svg"
            ]
        );
    }
}
