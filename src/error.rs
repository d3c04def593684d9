use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures a loader can surface.
///
/// Both variants are terminal for the call that hits them: no partial
/// sequence is returned, no record is skipped, nothing is retried. Blank or
/// missing *values* are never errors — they map to the documented sentinels
/// (NaN for numeric fields, the empty string for text).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source opened, but a record or the surrounding structure does
    /// not have the expected shape: wrong field count, undecodable row,
    /// missing manifest or column, unparseable numeric text.
    #[error("malformed record{}: {reason}", position(.index))]
    MalformedRecord {
        /// Zero-based position of the offending record, or `None` when the
        /// failure belongs to the top-level structure rather than one record.
        index: Option<usize>,
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn unavailable(path: &Path, source: io::Error) -> Self {
        LoadError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn record(index: usize, reason: impl Into<String>) -> Self {
        LoadError::MalformedRecord {
            index: Some(index),
            reason: reason.into(),
        }
    }

    pub(crate) fn structure(reason: impl Into<String>) -> Self {
        LoadError::MalformedRecord {
            index: None,
            reason: reason.into(),
        }
    }
}

fn position(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" {i}"),
        None => String::new(),
    }
}
