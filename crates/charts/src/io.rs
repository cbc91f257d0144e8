//! I/O operations for benchmark results.
//!
//! This module locates report and resource files in the input directory,
//! loads them into [`ResultEntry`] and [`ResourceSeries`] values, and
//! prepares the output directory.

use crate::error::{ChartError, Result};
use crate::extract::extract_metrics;
use crate::resource::parse_resource_samples;
use crate::result::{ResourceSeries, ResultEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files found in the input directory, each list sorted by filename.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discovered {
    /// Throughput/latency JSON reports.
    pub reports: Vec<PathBuf>,
    /// Resource-usage CSV samples.
    pub resources: Vec<PathBuf>,
}

/// List report files (`*.json`) and resource files (`*<suffix>`) in `dir`.
///
/// A missing directory yields empty lists.
pub fn discover(dir: &Path, resource_suffix: &str) -> Result<Discovered> {
    Ok(Discovered {
        reports: matching(dir, "*.json")?,
        resources: matching(dir, &format!("*{resource_suffix}"))?,
    })
}

fn matching(dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{escaped}/{file_pattern}");

    // Dotfiles are not results.
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut paths = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ChartError::io(path, e.into())
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Label of a report: the filename without directory and extension.
pub fn report_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Label of a resource file: the filename with `suffix` stripped.
pub fn resource_label(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(suffix) {
        Some(label) => label.to_string(),
        None => name,
    }
}

/// Read and extract one JSON report.
///
/// A file that is not valid JSON is fatal.
pub fn read_report(path: &Path) -> Result<ResultEntry> {
    let content = fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
    let report: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| ChartError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let metrics = extract_metrics(&report);
    debug!(path = %path.display(), ?metrics, "read report");
    Ok(ResultEntry::new(report_label(path), metrics))
}

/// Read one resource sample file.
pub fn read_resource(path: &Path, suffix: &str) -> Result<ResourceSeries> {
    let content = fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
    let samples = parse_resource_samples(&content);
    debug!(path = %path.display(), samples = samples.len(), "read resource samples");
    Ok(ResourceSeries::new(resource_label(path, suffix), samples))
}

/// Ensure the output directory exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ChartError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_label_strips_extension() {
        assert_eq!(report_label(Path::new("results/raw/go.json")), "go");
        assert_eq!(report_label(Path::new("dotnet-jit.json")), "dotnet-jit");
    }

    #[test]
    fn test_resource_label_strips_suffix() {
        assert_eq!(
            resource_label(Path::new("results/raw/node-resource.csv"), "-resource.csv"),
            "node"
        );
        assert_eq!(resource_label(Path::new("odd.csv"), "-resource.csv"), "odd.csv");
    }

    #[test]
    fn test_discover_sorted_and_split() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["node.json", "go.json", "rust-resource.csv", "go-resource.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let found = discover(dir.path(), "-resource.csv").unwrap();
        let names = |paths: &[PathBuf]| -> Vec<String> {
            paths.iter().map(|p| report_label(p)).collect()
        };
        assert_eq!(names(&found.reports), vec!["go", "node"]);
        assert_eq!(names(&found.resources), vec!["go-resource", "rust-resource"]);
    }

    #[test]
    fn test_discover_skips_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden.json"), "{}").unwrap();
        fs::write(dir.path().join(".cache-resource.csv"), "").unwrap();
        fs::write(dir.path().join("rust.json"), "{}").unwrap();

        let found = discover(dir.path(), "-resource.csv").unwrap();
        assert_eq!(found.reports, vec![dir.path().join("rust.json")]);
        assert!(found.resources.is_empty());
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = discover(&dir.path().join("absent"), "-resource.csv").unwrap();
        assert_eq!(found, Discovered::default());
    }

    #[test]
    fn test_read_report_corrupt_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_report(&path), Err(ChartError::Json { .. })));
    }
}
