//! Strongly connected component detection (Tarjan's algorithm).
//!
//! # Overview
//!
//! One-pass depth-first low-link search: each vertex gets a discovery
//! index and a low-link value (the smallest discovery index reachable
//! through tree and back edges without leaving the current traversal
//! stack). A vertex whose low-link equals its own discovery index roots a
//! component; everything above it on the component stack is popped and
//! collected as one SCC.
//!
//! The traversal is iterative: an explicit work-stack of
//! `(vertex, edge cursor)` frames replaces recursion, so component
//! detection does not overflow the call stack on long dependency chains.
//! The low-link propagation is unchanged — when a frame is finished its
//! low-link folds into its parent frame's.
//!
//! # Component numbering
//!
//! Tarjan completes a component only after every component reachable from
//! it has been completed. Numbering components in reverse completion
//! order therefore yields ids that are already topologically ordered:
//! every cross-component edge goes from a smaller id to a larger one. The
//! component list is stored in id order so `components()[id]` is the
//! member set of component `id`.

use std::fmt;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::metrics::Metrics;

const UNDISCOVERED: usize = usize::MAX;

/// Partition of a directed graph's vertices into strongly connected
/// components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    /// Member vertices per component, indexed by component id.
    components: Vec<Vec<usize>>,
    /// Component id per vertex.
    component_id: Vec<usize>,
}

impl SccResult {
    /// All components, indexed by component id.
    ///
    /// Ids ascend along condensation edges: an edge from component `a` to
    /// component `b` implies `a < b`.
    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] {
        &self.components
    }

    /// Component id of `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range for the analyzed graph.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> usize {
        self.component_id[vertex]
    }

    /// Number of components.
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Number of vertices in component `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid component id.
    #[must_use]
    pub fn component_size(&self, id: usize) -> usize {
        self.components[id].len()
    }

    /// Whether `u` and `v` belong to the same component, i.e. each is
    /// reachable from the other.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is out of range.
    #[must_use]
    pub fn in_same_component(&self, u: usize, v: usize) -> bool {
        self.component_id[u] == self.component_id[v]
    }

    /// Whether every component is a single vertex, i.e. the analyzed
    /// graph has no directed cycle through distinct vertices.
    ///
    /// Note that a self-loop still yields a singleton component, so this
    /// is not a full acyclicity check; use
    /// [`crate::topo::TopologicalSorter::is_dag`] for that.
    #[must_use]
    pub fn all_singletons(&self) -> bool {
        self.components.len() == self.component_id.len()
    }
}

impl fmt::Display for SccResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SCC result: {} components", self.num_components())?;
        for (id, members) in self.components.iter().enumerate() {
            writeln!(
                f,
                "  component {id} (size {}): {members:?}",
                members.len()
            )?;
        }
        Ok(())
    }
}

/// One suspended position in the iterative depth-first traversal: the
/// vertex being explored and how many of its edges were already taken.
struct Frame {
    vertex: usize,
    cursor: usize,
}

/// Mutable traversal state shared by every frame of one detection run.
struct Traversal {
    discovery: Vec<usize>,
    low_link: Vec<usize>,
    on_stack: FixedBitSet,
    component_stack: Vec<usize>,
    clock: usize,
}

impl Traversal {
    fn new(num_vertices: usize) -> Self {
        Self {
            discovery: vec![UNDISCOVERED; num_vertices],
            low_link: vec![0_usize; num_vertices],
            on_stack: FixedBitSet::with_capacity(num_vertices),
            component_stack: Vec::new(),
            clock: 0,
        }
    }

    fn discovered(&self, vertex: usize) -> bool {
        self.discovery[vertex] != UNDISCOVERED
    }

    fn discover(&mut self, vertex: usize, metrics: &mut dyn Metrics) {
        self.discovery[vertex] = self.clock;
        self.low_link[vertex] = self.clock;
        self.clock += 1;
        self.component_stack.push(vertex);
        self.on_stack.insert(vertex);
        metrics.increment("dfs_visits");
    }
}

/// Find all strongly connected components of `graph`.
///
/// Counters reported: `dfs_starts`, `dfs_visits`, `edge_traversals`,
/// `back_edges`, `scc_pops`, `scc_found`. Timer: `tarjan_scc_total`.
///
/// # Errors
///
/// Returns [`GraphError::UndirectedInput`] for undirected graphs.
#[instrument(skip_all)]
pub fn find_sccs(graph: &Graph, metrics: &mut dyn Metrics) -> Result<SccResult, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::UndirectedInput {
            algorithm: "SCC detection",
        });
    }

    metrics.start_timing("tarjan_scc_total");

    let n = graph.num_vertices();
    let mut state = Traversal::new(n);
    let mut components: Vec<Vec<usize>> = Vec::new();

    // Work-stack of suspended frames; replaces the recursive call stack.
    let mut frames: Vec<Frame> = Vec::new();

    for root in 0..n {
        if state.discovered(root) {
            continue;
        }
        metrics.increment("dfs_starts");

        state.discover(root, metrics);
        frames.push(Frame {
            vertex: root,
            cursor: 0,
        });

        while let Some(top) = frames.len().checked_sub(1) {
            let u = frames[top].vertex;
            let cursor = frames[top].cursor;

            if let Some(edge) = graph.edges_of(u).get(cursor) {
                frames[top].cursor += 1;
                let w = edge.to;
                metrics.increment("edge_traversals");

                if !state.discovered(w) {
                    // Tree edge: suspend u and descend into w.
                    state.discover(w, metrics);
                    frames.push(Frame {
                        vertex: w,
                        cursor: 0,
                    });
                } else if state.on_stack.contains(w) {
                    // Back edge into the live portion of the traversal.
                    state.low_link[u] = state.low_link[u].min(state.discovery[w]);
                    metrics.increment("back_edges");
                }
            } else {
                // All edges of u taken: u is finished.
                if state.low_link[u] == state.discovery[u] {
                    let mut component = Vec::new();
                    while let Some(v) = state.component_stack.pop() {
                        state.on_stack.set(v, false);
                        component.push(v);
                        metrics.increment("scc_pops");
                        if v == u {
                            break;
                        }
                    }
                    components.push(component);
                    metrics.increment("scc_found");
                }

                frames.pop();
                if let Some(parent) = frames.last() {
                    let p = parent.vertex;
                    state.low_link[p] = state.low_link[p].min(state.low_link[u]);
                }
            }
        }
    }

    // Components complete in dependency order (sinks first). Reverse so
    // ids ascend along every cross-component edge.
    components.reverse();
    let mut component_id = vec![0_usize; n];
    for (id, component) in components.iter().enumerate() {
        for &vertex in component {
            component_id[vertex] = id;
        }
    }

    metrics.stop_timing("tarjan_scc_total");
    debug!(
        vertices = n,
        components = components.len(),
        "SCC detection complete"
    );

    Ok(SccResult {
        components,
        component_id,
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

    fn find(graph: &Graph) -> SccResult {
        find_sccs(graph, &mut NoopMetrics).expect("directed input")
    }

    // -----------------------------------------------------------------------
    // Partition shape
    // -----------------------------------------------------------------------

    #[test]
    fn acyclic_graph_gives_singleton_components() {
        let graph = graph_with_edges(3, &[(0, 1), (1, 2)]);
        let result = find(&graph);

        assert_eq!(result.num_components(), 3);
        assert!(result.all_singletons());
    }

    #[test]
    fn three_cycle_is_one_component() {
        let graph = graph_with_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let result = find(&graph);

        assert_eq!(result.num_components(), 1);
        assert_eq!(result.component_size(0), 3);
        assert!(result.in_same_component(0, 2));
    }

    #[test]
    fn mixed_cycle_and_tail() {
        // 0 ⇄ 1, then 1 → 2 downstream.
        let graph = graph_with_edges(3, &[(0, 1), (1, 0), (1, 2)]);
        let result = find(&graph);

        assert_eq!(result.num_components(), 2);
        assert!(result.in_same_component(0, 1));
        assert!(!result.in_same_component(0, 2));
    }

    #[test]
    fn every_vertex_in_exactly_one_component() {
        let graph = graph_with_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (1, 3)]);
        let result = find(&graph);

        let total: usize = result.components().iter().map(Vec::len).sum();
        assert_eq!(total, 6, "component sizes sum to the vertex count");

        for vertex in 0..6 {
            let id = result.component_of(vertex);
            assert!(
                result.components()[id].contains(&vertex),
                "vertex {vertex} listed in its own component"
            );
        }
    }

    #[test]
    fn disconnected_graph_fully_covered() {
        let graph = graph_with_edges(4, &[(0, 1), (2, 3)]);
        let result = find(&graph);

        assert_eq!(result.num_components(), 4);
        let total: usize = result.components().iter().map(Vec::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn self_loop_is_singleton_component() {
        let graph = graph_with_edges(2, &[(0, 0), (0, 1)]);
        let result = find(&graph);

        assert_eq!(result.num_components(), 2);
        assert!(result.all_singletons());
    }

    // -----------------------------------------------------------------------
    // Component id ordering
    // -----------------------------------------------------------------------

    #[test]
    fn ids_ascend_along_cross_component_edges() {
        // Two cycles with a bridge: {0,1} → {2,3}, plus a lone tail 4.
        let graph = graph_with_edges(
            5,
            &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2), (3, 4)],
        );
        let result = find(&graph);

        for u in 0..5 {
            for edge in graph.edges_of(u) {
                let (cu, cv) = (result.component_of(u), result.component_of(edge.to));
                if cu != cv {
                    assert!(cu < cv, "edge {u}->{} must ascend in id", edge.to);
                }
            }
        }
    }

    #[test]
    fn component_list_indexed_by_id() {
        let graph = graph_with_edges(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
        let result = find(&graph);

        for (id, members) in result.components().iter().enumerate() {
            for &vertex in members {
                assert_eq!(result.component_of(vertex), id);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Deep graphs (iterative traversal)
    // -----------------------------------------------------------------------

    #[test]
    fn long_chain_does_not_overflow() {
        let n = 200_000;
        let mut graph = Graph::new(n, true);
        for v in 0..n - 1 {
            graph.add_edge(v, v + 1, 1.0).expect("in range");
        }

        let result = find(&graph);
        assert_eq!(result.num_components(), n);
    }

    #[test]
    fn long_cycle_is_one_component() {
        let n = 100_000;
        let mut graph = Graph::new(n, true);
        for v in 0..n {
            graph.add_edge(v, (v + 1) % n, 1.0).expect("in range");
        }

        let result = find(&graph);
        assert_eq!(result.num_components(), 1);
        assert_eq!(result.component_size(0), n);
    }

    // -----------------------------------------------------------------------
    // Preconditions and instrumentation
    // -----------------------------------------------------------------------

    #[test]
    fn undirected_graph_rejected() {
        let graph = Graph::new(3, false);
        let err = find_sccs(&graph, &mut NoopMetrics).expect_err("undirected");
        assert!(matches!(err, GraphError::UndirectedInput { .. }));
    }

    #[test]
    fn counters_reported() {
        let graph = graph_with_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let mut metrics = MetricsRecorder::new();

        find_sccs(&graph, &mut metrics).expect("directed input");

        assert_eq!(metrics.counter("dfs_visits"), 3);
        assert_eq!(metrics.counter("edge_traversals"), 3);
        assert_eq!(metrics.counter("scc_found"), 1);
        assert_eq!(metrics.counter("scc_pops"), 3);
        assert_eq!(metrics.counter("back_edges"), 1, "2->0 closes the cycle");
        assert!(metrics.time("tarjan_scc_total") > std::time::Duration::ZERO);
    }

    #[test]
    fn repeated_runs_identical() {
        let graph = graph_with_edges(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
        let first = find(&graph);
        let second = find(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn display_lists_components() {
        let graph = graph_with_edges(2, &[(0, 1)]);
        let rendered = find(&graph).to_string();
        assert!(rendered.contains("2 components"));
        assert!(rendered.contains("component 0"));
    }
}
