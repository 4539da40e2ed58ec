//! Dense matrix views of a project dependency graph.
//!
//! # Responsibility
//! - Derive an n x n 0/1 adjacency matrix from an ordered task list.
//!
//! # Invariants
//! - Row/column `i` is the task at position `i` of the input.
//! - Inputs are never mutated.

pub mod adjacency;

pub use adjacency::{build_adjacency_matrix, AdjacencyMatrix};
