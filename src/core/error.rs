/*!
# Unified Error Type

This module provides the unified error enum for all Pathina operations.
Dominance-driven label discards and cancelled runs are not errors and never
surface here; everything else propagates to the caller without retries.
*/

use std::error::Error;
use std::fmt;

/// Unified error type for all Pathina operations.
#[derive(Debug)]
pub enum PathinaError {
    /// Lookup of a weight or cost for an edge that is not in the graph
    NoSuchEdge(String),

    /// Path accumulation encountered a missing edge
    BrokenPath(String),

    /// No weight-feasible path exists for the given source, destination and bound
    Infeasible(String),

    /// A label query was made against a node that holds no labels
    EmptyLabelSet(String),

    /// The selection procedure returned no node while untreated predecessors remain
    DegenerateSelection(String),

    /// A graph or benchmark archive failed schema validation on load
    ArchiveCorrupt(String),

    /// An algorithm terminated in a state it should not be able to reach
    Algorithm(String),

    /// I/O error
    Io(String),

    /// Serialization/deserialization error
    Serialization(String),

    /// Invalid argument or parameter
    InvalidArgument(String),
}

impl PathinaError {
    /// Creates a missing-edge error.
    pub fn no_such_edge(message: impl Into<String>) -> Self {
        PathinaError::NoSuchEdge(message.into())
    }

    /// Creates a broken-path error.
    pub fn broken_path(message: impl Into<String>) -> Self {
        PathinaError::BrokenPath(message.into())
    }

    /// Creates an infeasibility error.
    pub fn infeasible(message: impl Into<String>) -> Self {
        PathinaError::Infeasible(message.into())
    }

    /// Creates an empty-label-set error.
    pub fn empty_label_set(message: impl Into<String>) -> Self {
        PathinaError::EmptyLabelSet(message.into())
    }

    /// Creates a degenerate-selection error.
    pub fn degenerate_selection(message: impl Into<String>) -> Self {
        PathinaError::DegenerateSelection(message.into())
    }

    /// Creates a corrupt-archive error.
    pub fn archive_corrupt(message: impl Into<String>) -> Self {
        PathinaError::ArchiveCorrupt(message.into())
    }

    /// Creates an unexpected-termination error.
    pub fn algorithm(message: impl Into<String>) -> Self {
        PathinaError::Algorithm(message.into())
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PathinaError::InvalidArgument(message.into())
    }
}

impl fmt::Display for PathinaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathinaError::NoSuchEdge(msg) => write!(f, "No such edge: {}", msg),
            PathinaError::BrokenPath(msg) => write!(f, "Broken path: {}", msg),
            PathinaError::Infeasible(msg) => write!(f, "No feasible path: {}", msg),
            PathinaError::EmptyLabelSet(msg) => write!(f, "Empty label set: {}", msg),
            PathinaError::DegenerateSelection(msg) => {
                write!(f, "Degenerate selection: {}", msg)
            }
            PathinaError::ArchiveCorrupt(msg) => write!(f, "Corrupt archive: {}", msg),
            PathinaError::Algorithm(msg) => write!(f, "Algorithm error: {}", msg),
            PathinaError::Io(msg) => write!(f, "I/O error: {}", msg),
            PathinaError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            PathinaError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl Error for PathinaError {}

impl From<std::io::Error> for PathinaError {
    fn from(e: std::io::Error) -> Self {
        PathinaError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PathinaError {
    fn from(e: serde_json::Error) -> Self {
        PathinaError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PathinaError::no_such_edge("(3, 7)");
        assert_eq!(format!("{}", err), "No such edge: (3, 7)");

        let err = PathinaError::infeasible("frontier at node 4 is empty");
        assert_eq!(format!("{}", err), "No feasible path: frontier at node 4 is empty");

        let err = PathinaError::degenerate_selection("no treatable node found");
        assert_eq!(format!("{}", err), "Degenerate selection: no treatable node found");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PathinaError = io_err.into();
        assert!(matches!(err, PathinaError::Io(_)));
    }
}
