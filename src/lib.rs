//! Topological ordering of a directed graph entered as a connectivity matrix.
//!
//! The stages are kept apart so each can fail on its own:
//!
//! - [`matrix`] reads and validates the node count and matrix
//! - [`graph`] builds the adjacency lists and runs Kahn's algorithm
//! - [`session`] drives one console run and renders the report

pub mod arguments;
pub mod error;
pub mod graph;
pub mod logger;
pub mod matrix;
pub mod session;

pub use error::{Error, GraphError, InputError, Result, ValidationError};
pub use graph::{Graph, Node, NodeId, TopologicalOrder};
pub use matrix::{AdjacencyMatrix, EntryPolicy};
