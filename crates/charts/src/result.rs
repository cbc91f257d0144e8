//! Benchmark result types.
//!
//! This module provides the per-runtime records produced by one run:
//! a [`ResultEntry`] per throughput/latency report and a
//! [`ResourceSeries`] per resource-usage sample file.

use serde::{Deserialize, Serialize};

/// Throughput and latency metrics extracted from one report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean requests per second.
    pub rps: f64,
    /// Mean latency in milliseconds.
    pub mean_latency_ms: f64,
    /// 99th percentile latency in milliseconds.
    pub p99_latency_ms: f64,
}

/// One benchmarked runtime and its report metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Runtime label derived from the report filename.
    pub label: String,
    /// Extracted metrics.
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl ResultEntry {
    /// Create a new ResultEntry.
    pub fn new(label: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            label: label.into(),
            metrics,
        }
    }
}

/// One container-stats sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSample {
    /// CPU usage in percent.
    pub cpu_percent: f64,
    /// Memory in use, in megabytes.
    pub memory_mb: f64,
}

/// Samples for one runtime, in file order.
///
/// The position of a sample is its elapsed time in sampling intervals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSeries {
    /// Runtime label derived from the resource filename.
    pub label: String,
    /// Samples in file order.
    pub samples: Vec<ResourceSample>,
}

impl ResourceSeries {
    /// Create a new ResourceSeries.
    pub fn new(label: impl Into<String>, samples: Vec<ResourceSample>) -> Self {
        Self {
            label: label.into(),
            samples,
        }
    }

    /// CPU percent values in sample order.
    pub fn cpu(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.cpu_percent).collect()
    }

    /// Memory megabyte values in sample order.
    pub fn memory(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.memory_mb).collect()
    }

    /// Highest CPU percent seen, or 0.0 for an empty series.
    pub fn peak_cpu(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.cpu_percent)
            .fold(0.0_f64, f64::max)
    }

    /// Highest memory use seen, or 0.0 for an empty series.
    pub fn peak_memory(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.memory_mb)
            .fold(0.0_f64, f64::max)
    }
}
