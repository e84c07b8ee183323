//! Combined SCC detection + condensation + topological ordering.
//!
//! # Pipeline
//!
//! ```text
//! Graph (may contain cycles)
//!   ↓  scc::find_sccs
//! SccResult
//!   ↓  condense::condense
//! Condensation (DAG over component ids)
//!   ↓  topo::KahnSorter
//! component order  →  vertex order (members emitted contiguously)
//! ```
//!
//! The condensation is acyclic by construction, so the sort step cannot
//! legitimately fail; if it ever reports a cycle that is a defect in the
//! condensation and is surfaced as [`GraphError::InvariantViolation`],
//! never silently tolerated.

use std::fmt;

use tracing::{error, instrument};

use crate::condense::{Condensation, condense};
use crate::error::GraphError;
use crate::graph::Graph;
use crate::metrics::Metrics;
use crate::scc::{SccResult, find_sccs};
use crate::topo::{KahnSorter, TopologicalSorter};

/// A dependency-respecting execution plan for a possibly-cyclic graph.
#[derive(Debug, Clone)]
pub struct ExecutionOrder {
    scc: SccResult,
    condensation: Condensation,
    component_order: Vec<usize>,
    vertex_order: Vec<usize>,
}

impl ExecutionOrder {
    /// The component partition of the analyzed graph.
    #[must_use]
    pub const fn scc(&self) -> &SccResult {
        &self.scc
    }

    /// The condensed DAG and its statistics.
    #[must_use]
    pub const fn condensation(&self) -> &Condensation {
        &self.condensation
    }

    /// Component ids in a valid topological order of the condensation.
    #[must_use]
    pub fn component_order(&self) -> &[usize] {
        &self.component_order
    }

    /// Original vertices, each component's members contiguous, components
    /// in topological position.
    ///
    /// Order among members of one component is the component's internal
    /// listing — arbitrary but deterministic for a given graph.
    #[must_use]
    pub fn vertex_order(&self) -> &[usize] {
        &self.vertex_order
    }
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Execution Order Summary ===")?;
        writeln!(f, "SCCs found: {}", self.scc.num_components())?;
        writeln!(
            f,
            "Condensation DAG: {} vertices, {} edges",
            self.condensation.num_components(),
            self.condensation.dag().edge_count()
        )?;
        writeln!(f, "Component order: {:?}", self.component_order)?;
        writeln!(f, "Vertex order: {:?}", self.vertex_order)?;
        Ok(())
    }
}

/// Run the full pipeline: detect SCCs, condense, order the condensation,
/// and derive the vertex-level order.
///
/// Timer: `scc_topo_total`, plus everything the individual stages report.
///
/// # Errors
///
/// - [`GraphError::UndirectedInput`] for undirected graphs.
/// - [`GraphError::InvariantViolation`] if the condensation unexpectedly
///   contains a cycle — a library defect, not an input error.
#[instrument(skip_all)]
pub fn plan_order(graph: &Graph, metrics: &mut dyn Metrics) -> Result<ExecutionOrder, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::UndirectedInput {
            algorithm: "execution ordering",
        });
    }

    metrics.start_timing("scc_topo_total");

    let scc = find_sccs(graph, metrics)?;
    let condensation = condense(graph, &scc)?;

    let component_order = match KahnSorter.sort(condensation.dag(), metrics) {
        Ok(order) => order,
        Err(GraphError::CycleDetected) => {
            metrics.stop_timing("scc_topo_total");
            error!("condensation contained a cycle; this is a defect in the condensation step");
            return Err(GraphError::InvariantViolation(
                "condensation must be acyclic",
            ));
        }
        Err(other) => {
            metrics.stop_timing("scc_topo_total");
            return Err(other);
        }
    };

    let vertex_order = component_order
        .iter()
        .flat_map(|&id| scc.components()[id].iter().copied())
        .collect();

    metrics.stop_timing("scc_topo_total");

    Ok(ExecutionOrder {
        scc,
        condensation,
        component_order,
        vertex_order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsRecorder, NoopMetrics};

    fn graph_with_edges(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut graph = Graph::new(n, true);
        for &(u, v) in edges {
            graph.add_edge(u, v, 1.0).expect("in range");
        }
        graph
    }

    fn plan(graph: &Graph) -> ExecutionOrder {
        plan_order(graph, &mut NoopMetrics).expect("directed input")
    }

    #[test]
    fn acyclic_graph_orders_all_vertices() {
        let graph = graph_with_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let order = plan(&graph);

        assert_eq!(order.component_order().len(), 4);
        assert_eq!(order.vertex_order().len(), 4);
        assert!(order.scc().all_singletons());
    }

    #[test]
    fn vertex_order_respects_cross_component_edges() {
        let graph = graph_with_edges(5, &[(0, 1), (1, 2), (2, 1), (2, 3), (3, 4)]);
        let order = plan(&graph);

        let mut position = vec![0_usize; 5];
        for (index, &vertex) in order.vertex_order().iter().enumerate() {
            position[vertex] = index;
        }

        for u in 0..5 {
            for edge in graph.edges_of(u) {
                let v = edge.to;
                if !order.scc().in_same_component(u, v) {
                    assert!(
                        position[u] < position[v],
                        "cross-component edge {u}->{v} points backward"
                    );
                }
            }
        }
    }

    #[test]
    fn component_members_are_contiguous() {
        let graph = graph_with_edges(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
        let order = plan(&graph);

        // Walk the vertex order; once we leave a component we must never
        // re-enter it.
        let mut seen_components = Vec::new();
        for &vertex in order.vertex_order() {
            let id = order.scc().component_of(vertex);
            if seen_components.last() != Some(&id) {
                assert!(
                    !seen_components.contains(&id),
                    "component {id} split across the vertex order"
                );
                seen_components.push(id);
            }
        }
    }

    #[test]
    fn component_order_is_topological_over_condensation() {
        let graph = graph_with_edges(6, &[(0, 1), (1, 0), (1, 2), (3, 4), (4, 2), (2, 5)]);
        let order = plan(&graph);

        let mut position = vec![0_usize; order.condensation().num_components()];
        for (index, &id) in order.component_order().iter().enumerate() {
            position[id] = index;
        }

        for c in 0..order.condensation().num_components() {
            for edge in order.condensation().dag().edges_of(c) {
                assert!(position[edge.from] < position[edge.to]);
            }
        }
    }

    #[test]
    fn fully_cyclic_graph_is_single_step() {
        let graph = graph_with_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let order = plan(&graph);

        assert_eq!(order.component_order(), &[0]);
        assert_eq!(order.vertex_order().len(), 3);
    }

    #[test]
    fn empty_graph_plans_empty_order() {
        let graph = Graph::new(0, true);
        let order = plan(&graph);

        assert!(order.component_order().is_empty());
        assert!(order.vertex_order().is_empty());
    }

    #[test]
    fn undirected_graph_rejected() {
        let graph = Graph::new(2, false);
        let err = plan_order(&graph, &mut NoopMetrics).expect_err("undirected");
        assert!(matches!(err, GraphError::UndirectedInput { .. }));
    }

    #[test]
    fn pipeline_timer_recorded() {
        let graph = graph_with_edges(3, &[(0, 1), (1, 2)]);
        let mut metrics = MetricsRecorder::new();

        plan_order(&graph, &mut metrics).expect("directed input");

        assert!(metrics.time("scc_topo_total") >= metrics.time("tarjan_scc_total"));
    }

    #[test]
    fn display_summarizes_pipeline() {
        let graph = graph_with_edges(3, &[(0, 1), (1, 0), (1, 2)]);
        let rendered = plan(&graph).to_string();

        assert!(rendered.contains("SCCs found: 2"));
        assert!(rendered.contains("Component order:"));
        assert!(rendered.contains("Vertex order:"));
    }
}
