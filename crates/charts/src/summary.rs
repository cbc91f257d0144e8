//! Markdown summary of extracted metrics.
//!
//! This module renders the numbers behind the charts as a markdown table,
//! for printing alongside a run.

use crate::result::{ResourceSeries, ResultEntry};
use std::fmt::Write;

/// Generate a markdown summary of report metrics and resource peaks.
pub fn generate_summary(entries: &[ResultEntry], resources: &[ResourceSeries]) -> String {
    let mut output = String::new();

    writeln!(output, "# Web API Benchmark Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Throughput and Latency").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Runtime | Requests/sec | Mean latency (ms) | p99 latency (ms) |").unwrap();
    writeln!(output, "|---------|--------------|-------------------|------------------|").unwrap();

    for entry in entries {
        writeln!(
            output,
            "| {} | {:.2} | {:.2} | {:.2} |",
            entry.label,
            entry.metrics.rps,
            entry.metrics.mean_latency_ms,
            entry.metrics.p99_latency_ms
        )
        .unwrap();
    }

    if !resources.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "## Resource Usage").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Runtime | Samples | Peak CPU (%) | Peak memory (MB) |").unwrap();
        writeln!(output, "|---------|---------|--------------|------------------|").unwrap();

        for series in resources {
            writeln!(
                output,
                "| {} | {} | {:.2} | {:.2} |",
                series.label,
                series.samples.len(),
                series.peak_cpu(),
                series.peak_memory()
            )
            .unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total reports: {}", entries.len()).unwrap();

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Metrics, ResourceSample};

    #[test]
    fn test_summary_rows_in_discovery_order() {
        let entries = vec![
            ResultEntry::new("go", Metrics { rps: 900.0, mean_latency_ms: 2.0, p99_latency_ms: 8.0 }),
            ResultEntry::new("rust", Metrics { rps: 1200.0, mean_latency_ms: 1.5, p99_latency_ms: 6.25 }),
        ];
        let summary = generate_summary(&entries, &[]);

        let go = summary.find("| go | 900.00 | 2.00 | 8.00 |").unwrap();
        let rust = summary.find("| rust | 1200.00 | 1.50 | 6.25 |").unwrap();
        assert!(go < rust);
        assert!(!summary.contains("Resource Usage"));
        assert!(summary.contains("Total reports: 2"));
    }

    #[test]
    fn test_summary_includes_resource_peaks() {
        let resources = vec![ResourceSeries::new(
            "node",
            vec![
                ResourceSample { cpu_percent: 40.0, memory_mb: 80.0 },
                ResourceSample { cpu_percent: 75.5, memory_mb: 64.0 },
            ],
        )];
        let summary = generate_summary(&[], &resources);
        assert!(summary.contains("| node | 2 | 75.50 | 80.00 |"));
    }
}
