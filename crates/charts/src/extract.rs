// Copyright 2025 WebAPI Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metric extraction from load-test JSON reports.
//!
//! Reports are loosely structured and drift between versions of the load
//! generator, so extraction is layered:
//!
//! 1. The known schema, `result.rps.mean`, `result.latency.mean` and
//!    `result.latency.p99` (or `result.latency.percentiles."99"`).
//! 2. A recursive scan over every mapping and sequence that matches
//!    lowercase key names and dotted key paths by substring.
//!
//! Each field keeps the first value found. Fields that are never found
//! default to `0.0`; nothing in this module fails.
//!
//! # Example
//!
//! ```
//! use webapi_bench_charts::extract::extract_metrics;
//!
//! let report = serde_json::json!({
//!     "result": { "rps": { "mean": 1200.5 }, "latency": { "mean": 2.1, "p99": 9.8 } }
//! });
//! let metrics = extract_metrics(&report);
//! assert_eq!(metrics.rps, 1200.5);
//! assert_eq!(metrics.p99_latency_ms, 9.8);
//! ```

use crate::result::Metrics;
use serde_json::{Map, Value};

/// Partially extracted metrics. `None` means "not found yet".
#[derive(Debug, Default)]
struct Found {
    rps: Option<f64>,
    mean: Option<f64>,
    p99: Option<f64>,
}

impl Found {
    fn into_metrics(self) -> Metrics {
        Metrics {
            rps: self.rps.unwrap_or(0.0),
            mean_latency_ms: self.mean.unwrap_or(0.0),
            p99_latency_ms: self.p99.unwrap_or(0.0),
        }
    }
}

/// The known-schema lookup hit a node of the wrong shape.
struct ShapeMismatch;

/// Extract (rps, mean latency, p99 latency) from a parsed report.
pub fn extract_metrics(report: &Value) -> Metrics {
    let mut found = Found::default();
    // A shape mismatch abandons the rest of the known path; whatever was
    // already found stays, the scan fills the gaps.
    let _ = known_schema(report, &mut found);
    scan(report, "", &mut found);
    found.into_metrics()
}

/// Look up `key` in `map`, treating an absent key as an empty mapping.
fn child<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, ShapeMismatch> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(_) => Err(ShapeMismatch),
    }
}

fn number(map: Option<&Map<String, Value>>, key: &str) -> Option<f64> {
    map.and_then(|m| m.get(key)).and_then(Value::as_f64)
}

fn known_schema(report: &Value, found: &mut Found) -> Result<(), ShapeMismatch> {
    let root = report.as_object().ok_or(ShapeMismatch)?;
    let result = child(root, "result")?;

    let rps = match result {
        Some(r) => child(r, "rps")?,
        None => None,
    };
    found.rps = number(rps, "mean");

    let latency = match result {
        Some(r) => child(r, "latency")?,
        None => None,
    };
    found.mean = number(latency, "mean");

    if let Some(p99) = number(latency, "p99") {
        found.p99 = Some(p99);
        return Ok(());
    }

    let percentiles = match latency {
        Some(l) => child(l, "percentiles")?,
        None => None,
    };
    found.p99 = number(percentiles, "99");
    Ok(())
}

/// Depth-first scan in document order. `path` is the dotted lowercase key
/// path of `node`; sequence items share their parent's path.
fn scan(node: &Value, path: &str, found: &mut Found) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let key = key.to_lowercase();
                let key_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };

                match value {
                    Value::Number(n) => {
                        let Some(v) = n.as_f64() else { continue };
                        match_leaf(&key, &key_path, v, found);
                    }
                    other => scan(other, &key_path, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                scan(item, path, found);
            }
        }
        _ => {}
    }
}

fn match_leaf(key: &str, key_path: &str, value: f64, found: &mut Found) {
    if found.rps.is_none() && key.contains("rps") {
        found.rps = Some(value);
    }
    if found.mean.is_none()
        && (key.contains("mean") || key.contains("avg"))
        && key_path.contains("lat")
    {
        found.mean = Some(value);
    }
    // "p999" contains "p99" and is accepted as well.
    if found.p99.is_none()
        && (key.contains("p99") || key == "99")
        && (key_path.contains("lat") || key_path.contains("percentile"))
    {
        found.p99 = Some(value);
    }
}
