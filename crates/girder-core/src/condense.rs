//! SCC condensation: collapse each component into a single vertex.
//!
//! # Overview
//!
//! Given a graph and its component partition, build a fresh [`Graph`]
//! whose vertices are component ids. An edge exists between two distinct
//! components iff some original edge crosses between them. Intra-component
//! edges are skipped (they would be self-loops), and parallel
//! cross-component edges are deduplicated: the first one encountered
//! during construction keeps its weight, later ones are dropped — never
//! merged, summed, or min'd. That policy discards weight information when
//! parallel edges disagree; it is pinned by a test rather than "fixed"
//! here because downstream consumers depend on the exact behavior.
//!
//! Because component ids are assigned in reverse completion order by the
//! detector (see [`crate::scc`]), the condensed graph is a DAG whose
//! vertex numbering is already a valid topological order.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::scc::SccResult;

/// A condensed dependency graph plus its bookkeeping tables.
///
/// Owns a fresh [`Graph`] over component ids; nothing aliases the
/// original graph's edge records.
#[derive(Debug, Clone)]
pub struct Condensation {
    dag: Graph,
    vertex_component: Vec<usize>,
    component_sizes: Vec<usize>,
    original_edges: usize,
}

impl Condensation {
    /// The condensed graph. Acyclic by construction.
    #[must_use]
    pub const fn dag(&self) -> &Graph {
        &self.dag
    }

    /// Component id of an original vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range for the original graph.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> usize {
        self.vertex_component[vertex]
    }

    /// The full vertex → component id table, indexed by original vertex.
    #[must_use]
    pub fn vertex_components(&self) -> &[usize] {
        &self.vertex_component
    }

    /// Number of components (vertices of the condensed graph).
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.dag.num_vertices()
    }

    /// Member count per component, indexed by component id.
    #[must_use]
    pub fn component_sizes(&self) -> &[usize] {
        &self.component_sizes
    }

    /// Vertices of the original graph.
    #[must_use]
    pub fn original_vertices(&self) -> usize {
        self.vertex_component.len()
    }

    /// Ratio of condensed vertices to original vertices, in `[0, 1]`.
    ///
    /// 1.0 means nothing was collapsed (the input was already acyclic);
    /// values below 1.0 measure how much cycle structure the input had.
    /// 0.0 for an empty graph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_ratio(&self) -> f64 {
        if self.original_vertices() == 0 {
            return 0.0;
        }
        self.num_components() as f64 / self.original_vertices() as f64
    }
}

impl fmt::Display for Condensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Condensation Statistics ===")?;
        writeln!(
            f,
            "Original graph: {} vertices, {} edges",
            self.original_vertices(),
            self.original_edges
        )?;
        writeln!(
            f,
            "Condensed DAG: {} components, {} edges",
            self.num_components(),
            self.dag.edge_count()
        )?;
        writeln!(
            f,
            "Compression ratio: {:.2}%",
            self.compression_ratio() * 100.0
        )?;
        writeln!(f, "Component sizes:")?;
        for (id, size) in self.component_sizes.iter().enumerate() {
            writeln!(f, "  Component {id}: {size} vertices")?;
        }
        Ok(())
    }
}

/// Build the condensation of `graph` under the partition `scc`.
///
/// # Errors
///
/// Returns [`GraphError::VertexOutOfRange`] when a component id in `scc`
/// exceeds the partition's own component count. With a partition produced
/// by [`crate::scc::find_sccs`] on the same graph this cannot happen.
///
/// # Panics
///
/// Panics if `scc` covers fewer vertices than `graph` has. Pairing a
/// graph with a partition computed from a different graph is a caller
/// contract violation.
#[instrument(skip_all)]
pub fn condense(graph: &Graph, scc: &SccResult) -> Result<Condensation, GraphError> {
    let num_components = scc.num_components();
    let mut dag = Graph::new(num_components, true);

    // Ordered component pairs already linked; first edge seen wins.
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for u in 0..graph.num_vertices() {
        let cu = scc.component_of(u);

        for edge in graph.edges_of(u) {
            let cv = scc.component_of(edge.to);
            if cu != cv && seen.insert((cu, cv)) {
                dag.add_edge(cu, cv, edge.weight)?;
            }
        }
    }

    let component_sizes = (0..num_components).map(|id| scc.component_size(id)).collect();
    let vertex_component = (0..graph.num_vertices())
        .map(|v| scc.component_of(v))
        .collect();

    debug!(
        components = num_components,
        condensed_edges = dag.edge_count(),
        "condensation built"
    );

    Ok(Condensation {
        dag,
        vertex_component,
        component_sizes,
        original_edges: graph.edge_count(),
    })
}
