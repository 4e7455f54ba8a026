//! Error type shared by every fallible `Mat` operation.
use std::path::PathBuf;
use thiserror::Error;

use crate::mat::Shape;

pub type Result<T, E = MatError> = std::result::Result<T, E>;

/// Failure kinds reported by construction, checked access, arithmetic and
/// the codec I/O layer. Every variant is recoverable by the caller.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MatError {
    #[error("invalid dimensions: batch={batch} rows={rows} cols={cols} channels={channels}")]
    InvalidDimensions {
        batch: usize,
        rows: usize,
        cols: usize,
        channels: usize,
    },

    #[error("invalid filename: {0:?}")]
    InvalidFilename(PathBuf),

    #[error("failed to load image {path:?}: {reason}")]
    ImageLoadFailed { path: PathBuf, reason: String },

    #[error("failed to write image {path:?}: {reason}")]
    WriteImageFailed { path: PathBuf, reason: String },

    #[error("index {index:?} out of bounds for shape {shape}")]
    OutOfBounds { index: Vec<usize>, shape: Shape },

    #[error("incompatible dimensions: {lhs} vs {rhs}")]
    IncompatibleDimensions { lhs: Shape, rhs: Shape },

    #[error("operation not supported for {channels} channel(s)")]
    InvalidChannelsForOperation { channels: usize },

    #[error("record payload is {actual} bytes, shape {shape} requires {expected}")]
    ProtoDataMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    #[error("malformed record: {0}")]
    ProtoDecode(String),

    #[error("I/O error on {path:?}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("invalid configuration {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

impl MatError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
