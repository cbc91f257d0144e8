// Copyright 2025 WebAPI Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Container-stats sample parsing.
//!
//! A resource file holds one comma-separated record per sampling interval:
//!
//! ```text
//! name,cpu%,used / limit,net in / out,block in / out,pids
//! "rust-api","12.5%","512MiB / 1GiB","1kB / 2kB","0B / 0B","5"
//! ```
//!
//! Records with fewer than six fields, a first field that is not a
//! container-name token, or a CPU field that is not a number are skipped.
//! This drops header and blank lines without any special casing.
//!
//! Memory units are normalised to megabytes with a 1024 multiplier for both
//! binary (`KiB`, `MiB`, `GiB`) and decimal (`KB`, `MB`, `GB`) suffixes.

use crate::result::ResourceSample;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Minimum number of fields in a stats record.
pub const MIN_FIELDS: usize = 6;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("valid name regex"));

static MEMORY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]+(?:[.,][0-9]+)?)\s*([KMG]i?B)$").expect("valid memory regex")
});

/// Parse the full text of a resource file into samples, in file order.
///
/// Each physical line is read as its own record, so a malformed line (an
/// unclosed quote, say) only drops itself.
pub fn parse_resource_samples(text: &str) -> Vec<ResourceSample> {
    let mut samples = Vec::new();
    for (idx, text_line) in text.lines().enumerate() {
        let line = idx + 1;
        if text_line.trim().is_empty() {
            continue;
        }
        let record = match read_line_record(text_line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                debug!(line, error = %e, "skipping unreadable resource line");
                continue;
            }
        };
        match parse_record(&record) {
            Some(sample) => samples.push(sample),
            None => debug!(line, "skipping resource line that is not a stats line"),
        }
    }
    samples
}

fn read_line_record(text_line: &str) -> csv::Result<Option<csv::StringRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text_line.as_bytes());
    reader.records().next().transpose()
}

fn parse_record(record: &csv::StringRecord) -> Option<ResourceSample> {
    if record.len() < MIN_FIELDS {
        return None;
    }
    if !NAME_RE.is_match(record.get(0)?) {
        return None;
    }
    let cpu_percent = parse_cpu_percent(record.get(1)?)?;
    let memory_mb = record.get(2).map(parse_memory_mb).unwrap_or(0.0);
    Some(ResourceSample {
        cpu_percent,
        memory_mb,
    })
}

/// Parse a CPU field such as `12.5%` or `12,5%`.
pub fn parse_cpu_percent(field: &str) -> Option<f64> {
    let value: f64 = field
        .trim()
        .trim_end_matches('%')
        .trim()
        .replace(',', ".")
        .parse()
        .ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse the "used" part of a `used / limit` memory field into megabytes.
///
/// Unparseable input and unknown units yield `0.0`.
pub fn parse_memory_mb(field: &str) -> f64 {
    let used = field.split('/').next().unwrap_or("").trim();
    let Some(caps) = MEMORY_RE.captures(used) else {
        return 0.0;
    };
    let Ok(amount) = caps[1].replace(',', ".").parse::<f64>() else {
        return 0.0;
    };
    let unit = caps[2].to_ascii_lowercase();
    match unit.trim_end_matches('b').trim_end_matches('i') {
        "k" => amount / 1024.0,
        "m" => amount,
        "g" => amount * 1024.0,
        _ => 0.0,
    }
}
