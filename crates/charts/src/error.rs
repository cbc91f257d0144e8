// Copyright 2025 WebAPI Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the chart pipeline.
//!
//! Only conditions the operator has to fix surface here: unreadable input,
//! corrupt report files and output failures. Missing metrics and malformed
//! resource rows are absorbed by the parsers and never become a [`ChartError`].

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a chart run.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A file or directory could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A report file is not valid JSON.
    #[error("Corrupt JSON report {}: {source}", path.display())]
    Json {
        /// Report file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The discovery pattern built from the input directory is invalid.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The plotting backend failed to produce an artifact.
    #[error("Failed to render {}: {message}", path.display())]
    Render {
        /// Chart file being written.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ChartError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChartError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
