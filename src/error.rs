use std::path::PathBuf;

use thiserror::Error;

/// Failures of the upstream text source. These are the only hard failures:
/// once there is text, the pipeline always produces a result.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode PDF {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("text extraction of {path} timed out after {secs}s")]
    Timeout { path: PathBuf, secs: u64 },
    #[error("no usable text in {0}")]
    NoText(PathBuf),
}

/// A workout record that breaks the five-slot contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidWorkout {
    #[error("expected 5 sections, found {0}")]
    SectionCount(usize),
    #[error("section {position} should be '{expected}', found '{found}'")]
    SlotOrder {
        position: usize,
        expected: &'static str,
        found: String,
    },
    #[error("section '{0}' must last at least one minute")]
    Duration(String),
    #[error("section '{0}' has empty content lines")]
    Content(String),
    #[error("focus technique is empty")]
    Focus,
}
