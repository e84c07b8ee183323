//! Error types shared by all graph algorithms.

use thiserror::Error;

/// Errors reported by graph construction and the analysis algorithms.
///
/// All failures are synchronous and local: an operation that returns an
/// error has not partially mutated caller-visible state, and no algorithm
/// retries, clamps indices, or degrades to a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex index was outside the graph's `[0, num_vertices)` range.
    #[error("vertex {vertex} is out of range [0, {num_vertices})")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: usize,
        /// The graph's vertex count at the time of the call.
        num_vertices: usize,
    },

    /// A directed-only algorithm was given an undirected graph.
    #[error("{algorithm} requires a directed graph")]
    UndirectedInput {
        /// Name of the rejecting algorithm, for diagnostics.
        algorithm: &'static str,
    },

    /// The graph contains a directed cycle, so no topological ordering
    /// (and no DAG path table) exists.
    #[error("graph contains a cycle; no topological ordering exists")]
    CycleDetected,

    /// An internal invariant was violated. This indicates a defect in the
    /// library, not bad input; it is never coerced into a degraded result.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
}
