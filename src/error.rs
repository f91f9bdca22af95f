//! Error types shared by the whole toolkit.

use thiserror::Error;

use crate::graph::VertexId;

/// Errors produced by graph construction, generation, aggregation and I/O.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The edge would be a self-loop, a duplicate, or carries an invalid weight.
    #[error("invalid edge ({from}, {to}): {reason}")]
    InvalidEdge {
        /// First endpoint of the rejected edge.
        from: VertexId,
        /// Second endpoint of the rejected edge.
        to: VertexId,
        /// Why the edge was rejected.
        reason: &'static str,
    },
    /// Generator, solver or binning arguments are out of range.
    #[error("invalid parameters: {reason}")]
    InvalidParameters {
        /// Human readable description of the violated constraint.
        reason: String,
    },
    /// No property set with this name has been computed.
    #[error("property set `{0}` not found")]
    PropertySetNotFound(String),
    /// The exact clique search ran out of time, its results must not be used.
    #[error("search did not finish within its time budget")]
    Unfinished,
    /// A line of a graph or degree-sequence file could not be understood.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_parameters(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
