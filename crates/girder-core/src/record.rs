//! External graph records and their conversion into [`Graph`] values.
//!
//! A [`GraphRecord`] is the serde-facing description of a task graph:
//! vertex count, directedness, weighted edge list, an optional default
//! source vertex, and a free-form weight-model tag. The CLI deserializes
//! records from JSON files; the field names (`n`, `u`, `v`, `w`) match
//! the compact on-disk schema.
//!
//! Conversion validates every edge endpoint through [`Graph::add_edge`],
//! so a malformed vertex reference surfaces as a construction-time
//! failure rather than a silent drop.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::graph::{DEFAULT_WEIGHT, Graph};

/// One edge of an external graph record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source vertex.
    pub u: usize,
    /// Target vertex.
    pub v: usize,
    /// Edge weight; 1.0 when the record omits it.
    #[serde(default = "default_weight")]
    pub w: f64,
}

/// An external description of a task-dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// Whether the graph is directed. Defaults to `true`.
    #[serde(default = "default_directed")]
    pub directed: bool,
    /// Number of vertices.
    pub n: usize,
    /// Weighted edge list.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    /// Optional default source vertex for path queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
    /// Free-form tag describing what the weights model. Defaults to
    /// `"edge"`; carried through for consumers, not interpreted here.
    #[serde(default = "default_weight_model")]
    pub weight_model: String,
}

impl GraphRecord {
    /// Build the in-memory [`Graph`] this record describes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] when any edge references
    /// a vertex outside `[0, n)`.
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        let mut graph = Graph::new(self.n, self.directed);
        for edge in &self.edges {
            graph.add_edge(edge.u, edge.v, edge.w)?;
        }
        Ok(graph)
    }
}

const fn default_directed() -> bool {
    true
}

const fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

fn default_weight_model() -> String {
    "edge".to_string()
}
