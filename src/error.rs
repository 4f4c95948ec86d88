//! Error types for every stage of a run.
//!
//! Each stage (reading input, validating the matrix, sorting the graph) has its
//! own error enum. [`Error`] unifies them for the driver and decides the exit
//! status of the process.

use crate::graph::NodeId;
use std::io;
use thiserror::Error;

/// Result type for a whole session
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading the node count and matrix from input
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InputError {
    /// A token could not be parsed as an integer
    #[error("expected an integer for {what}, found '{token}'")]
    NotAnInteger {
        /// What was being read when the token was found
        what: String,
        /// The offending token
        token: String,
    },

    /// Input ended before all values were read
    #[error("input ended while reading {what}")]
    UnexpectedEof {
        /// What was being read when input ended
        what: String,
    },

    /// The node count was negative
    #[error("number of nodes must not be negative, got {0}")]
    NegativeNodeCount(i64),

    /// Reading from the input stream failed
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

impl InputError {
    pub fn not_an_integer(what: impl Into<String>, token: impl Into<String>) -> Self {
        Self::NotAnInteger {
            what: what.into(),
            token: token.into(),
        }
    }

    pub fn unexpected_eof(what: impl Into<String>) -> Self {
        Self::UnexpectedEof { what: what.into() }
    }
}

/// Errors raised when a matrix is well-formed input but not a valid graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A row has a different length than the number of rows
    #[error("matrix is not square: row {row} has {found} values, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell holds something other than 0 or 1
    #[error("matrix entry at row {row}, column {column} must be 0 or 1, got {value}")]
    InvalidEntry { row: usize, column: usize, value: i64 },
}

/// Errors raised by graph algorithms
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// Some nodes never reached indegree zero
    #[error("cycle detected: nodes {} could not be ordered", join_ids(.unordered))]
    CycleDetected {
        /// Nodes left without a position, ascending by id
        unordered: Vec<NodeId>,
    },
}

impl GraphError {
    pub fn cycle(unordered: Vec<NodeId>) -> Self {
        Self::CycleDetected { unordered }
    }
}

/// Any failure of a session
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Writing the report failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Input(_) | Error::Io(_) => 1,
            Error::Validation(_) => 2,
            Error::Graph(_) => 3,
        }
    }
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
