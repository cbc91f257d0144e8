// Copyright 2025 WebAPI Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then explicit overrides from the caller.
//!
//! ```toml
//! input_dir = "results/raw"
//! output_dir = "results/charts"
//! resource_suffix = "-resource.csv"
//! width = 1024
//! height = 640
//! ```

use crate::error::Result;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory holding report and resource files.
pub const DEFAULT_INPUT_DIR: &str = "results/raw";

/// Default directory charts are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "results/charts";

/// Filename suffix identifying resource sample files.
pub const DEFAULT_RESOURCE_SUFFIX: &str = "-resource.csv";

/// Settings for one chart run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Directory scanned for `*.json` reports and resource files.
    pub input_dir: PathBuf,
    /// Directory charts are written to; created if missing.
    pub output_dir: PathBuf,
    /// Suffix identifying resource files, stripped to form their label.
    pub resource_suffix: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            resource_suffix: DEFAULT_RESOURCE_SUFFIX.to_string(),
            width: 1024,
            height: 640,
        }
    }
}

impl ChartsConfig {
    /// Load configuration, reading `path` as TOML on top of the defaults.
    ///
    /// The file must exist when a path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ChartsConfig::default();
        let mut builder = Config::builder()
            .set_default("input_dir", defaults.input_dir.to_string_lossy().into_owned())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().into_owned())?
            .set_default("resource_suffix", defaults.resource_suffix)?
            .set_default("width", i64::from(defaults.width))?
            .set_default("height", i64::from(defaults.height))?;

        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Replace the input directory.
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Replace the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = ChartsConfig::load(None).unwrap();
        assert_eq!(config, ChartsConfig::default());
        assert_eq!(config.input_dir, PathBuf::from("results/raw"));
        assert_eq!(config.output_dir, PathBuf::from("results/charts"));
    }

    #[test]
    fn test_file_overrides_some_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "output_dir = \"out/charts\"\nwidth = 800").unwrap();

        let config = ChartsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out/charts"));
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 640);
        assert_eq!(config.resource_suffix, "-resource.csv");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = ChartsConfig::load(Some(Path::new("/nonexistent/charts.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ChartsConfig::default()
            .with_input_dir("in")
            .with_output_dir("out");
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
