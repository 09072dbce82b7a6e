#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the collector crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint, so the lint is disabled
//! for this module.

use std::path::{Path, PathBuf};

/// Unified error type returned by the collector, the index aggregator and the
/// CLI.
///
/// Fetch and extraction failures are recoverable at the collection boundary
/// (the job degrades to curated records); every other variant reaches `main`
/// and turns into a non-zero exit status.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors raised while reading or writing files.
    #[error("filesystem operation failed at {path:?}: {source}")]
    Io {
        /// Location of the file or directory involved.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors from the curated catalog.
    #[error("failed to parse curated catalog: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when input data violates invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps serialization errors when printing records as JSON.
    #[error("failed to serialize records: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// Network failures while downloading the trending page.
    #[error("failed to fetch trending page: {message}")]
    Fetch {
        /// Human readable description of the transport failure.
        message: String
    },
    /// The trending page was downloaded but yielded no usable records.
    #[error("failed to extract trending repositories: {message}")]
    Extraction {
        /// Human readable description of the extraction failure.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a fetch error from the provided displayable value.
    pub fn fetch<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Fetch {
            message: message.into()
        }
    }

    /// Constructs an extraction error from the provided displayable value.
    pub fn extraction<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Extraction {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Fetch {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - File or directory that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
