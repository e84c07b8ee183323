//! Directed weighted graph over dense vertex indices.
//!
//! # Representation
//!
//! Vertices are plain `usize` indices in `[0, num_vertices)` with no
//! payload; edges carry an `f64` weight (a duration or cost). Each vertex
//! owns its outgoing edges in insertion order, and that order is load
//! bearing: every downstream algorithm breaks ties by relaxing or visiting
//! edges in the order they were added.
//!
//! Parallel edges between the same ordered pair are allowed and treated
//! independently by the path engine. Condensation deduplicates them; see
//! [`crate::condense`].
//!
//! An undirected mode exists (every added edge is mirrored) for
//! completeness of the data model, but all analysis algorithms in this
//! crate require `directed = true` and reject undirected input.

use std::fmt;

use crate::error::GraphError;

/// Default edge weight used when an input record omits one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A directed edge with a floating-point weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Source vertex.
    pub from: usize,
    /// Target vertex.
    pub to: usize,
    /// Edge weight (duration/cost).
    pub weight: f64,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {}, w={:.2})", self.from, self.to, self.weight)
    }
}

/// Adjacency-list graph with a fixed vertex count.
///
/// The vertex count and directedness are fixed at construction; only the
/// edge set grows. A fresh graph (with a fresh dense index range) is built
/// when SCCs are condensed.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create a graph with `num_vertices` vertices and no edges.
    #[must_use]
    pub fn new(num_vertices: usize, directed: bool) -> Self {
        Self {
            directed,
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Append the edge `from → to` with the given weight.
    ///
    /// For undirected graphs the mirror edge `to → from` is appended as
    /// well. Both endpoints are validated before anything is inserted, so
    /// a failed call leaves the graph unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] when either endpoint is
    /// outside `[0, num_vertices)`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        self.adjacency[from].push(Edge { from, to, weight });

        if !self.directed {
            self.adjacency[to].push(Edge {
                from: to,
                to: from,
                weight,
            });
        }

        Ok(())
    }

    /// Outgoing edges of `vertex`, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range. Passing a valid index is part
    /// of the caller's contract; use [`Graph::num_vertices`] to check.
    #[must_use]
    pub fn edges_of(&self, vertex: usize) -> &[Edge] {
        &self.adjacency[vertex]
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether this graph is directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of edges.
    ///
    /// For undirected graphs this is half the stored adjacency entries;
    /// the representation stores each undirected edge twice.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.adjacency.iter().map(Vec::len).sum();
        if self.directed { stored } else { stored / 2 }
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.num_vertices() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                num_vertices: self.num_vertices(),
            })
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph: {} vertices, {} edges, {}",
            self.num_vertices(),
            self.edge_count(),
            if self.directed {
                "directed"
            } else {
                "undirected"
            }
        )?;

        for (vertex, edges) in self.adjacency.iter().enumerate() {
            let rendered: Vec<String> = edges.iter().map(ToString::to_string).collect();
            writeln!(f, "  {vertex}: [{}]", rendered.join(", "))?;
        }

        Ok(())
    }
}
