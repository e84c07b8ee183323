//! End-to-end pipeline tests and cross-checks against petgraph.
//!
//! The unit tests inside each module pin concrete behavior; these tests
//! run the whole pipeline on randomly generated digraphs and compare the
//! SCC partition and cycle verdicts against petgraph's implementations.

use std::collections::BTreeSet;

use girder_core::{
    Graph, KahnSorter, NoopMetrics, SccResult, TopologicalSorter, condense, find_sccs,
    longest_paths, plan_order, shortest_paths,
};
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use proptest::prelude::*;

fn build_graph(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new(n, true);
    for &(u, v) in edges {
        graph.add_edge(u, v, 1.0).expect("in range");
    }
    graph
}

fn build_petgraph(n: usize, edges: &[(usize, usize)]) -> DiGraph<(), ()> {
    let mut graph = DiGraph::<(), ()>::new();
    let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
    for &(u, v) in edges {
        graph.add_edge(nodes[u], nodes[v], ());
    }
    graph
}

fn component_sets(result: &SccResult) -> BTreeSet<BTreeSet<usize>> {
    result
        .components()
        .iter()
        .map(|members| members.iter().copied().collect())
        .collect()
}

fn petgraph_component_sets(graph: &DiGraph<(), ()>) -> BTreeSet<BTreeSet<usize>> {
    tarjan_scc(graph)
        .into_iter()
        .map(|component| component.into_iter().map(NodeIndex::index).collect())
        .collect()
}

/// Arbitrary digraph: a vertex count and an edge list over it.
fn arb_digraph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1_usize..20).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..48),
        )
    })
}

/// Arbitrary DAG: edges forced to ascend in vertex index.
fn arb_dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    arb_digraph().prop_map(|(n, edges)| {
        let dag_edges = edges
            .into_iter()
            .filter(|&(u, v)| u != v)
            .map(|(u, v)| (u.min(v), u.max(v)))
            .collect();
        (n, dag_edges)
    })
}

proptest! {
    #[test]
    fn prop_scc_partition_matches_petgraph((n, edges) in arb_digraph()) {
        let graph = build_graph(n, &edges);
        let reference = build_petgraph(n, &edges);

        let result = find_sccs(&graph, &mut NoopMetrics).expect("directed input");
        prop_assert_eq!(component_sets(&result), petgraph_component_sets(&reference));
    }

    #[test]
    fn prop_cycle_verdict_matches_petgraph((n, edges) in arb_digraph()) {
        let graph = build_graph(n, &edges);
        let reference = build_petgraph(n, &edges);

        prop_assert_eq!(
            KahnSorter.is_dag(&graph),
            toposort(&reference, None).is_ok()
        );
    }

    #[test]
    fn prop_component_sizes_sum_to_vertex_count((n, edges) in arb_digraph()) {
        let graph = build_graph(n, &edges);
        let result = find_sccs(&graph, &mut NoopMetrics).expect("directed input");

        let total: usize = result.components().iter().map(Vec::len).sum();
        prop_assert_eq!(total, n);
        for vertex in 0..n {
            let id = result.component_of(vertex);
            prop_assert!(result.components()[id].contains(&vertex));
        }
    }

    #[test]
    fn prop_condensation_is_acyclic_and_ascending((n, edges) in arb_digraph()) {
        let graph = build_graph(n, &edges);
        let scc = find_sccs(&graph, &mut NoopMetrics).expect("directed input");
        let condensation = condense(&graph, &scc).expect("matching partition");

        prop_assert!(KahnSorter.is_dag(condensation.dag()));
        for c in 0..condensation.num_components() {
            for edge in condensation.dag().edges_of(c) {
                prop_assert!(edge.from < edge.to, "ids ascend along edges");
            }
        }
    }

    #[test]
    fn prop_topo_order_respects_all_edges((n, edges) in arb_digraph()) {
        let graph = build_graph(n, &edges);

        if let Ok(order) = KahnSorter.sort(&graph, &mut NoopMetrics) {
            prop_assert_eq!(order.len(), n);

            let mut position = vec![0_usize; n];
            for (index, &vertex) in order.iter().enumerate() {
                position[vertex] = index;
            }
            for u in 0..n {
                for edge in graph.edges_of(u) {
                    prop_assert!(position[u] < position[edge.to]);
                }
            }
        }
    }

    #[test]
    fn prop_vertex_order_is_a_permutation((n, edges) in arb_digraph()) {
        let graph = build_graph(n, &edges);
        let order = plan_order(&graph, &mut NoopMetrics).expect("directed input");

        let mut sorted = order.vertex_order().to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_shortest_fixed_point_on_dags((n, edges) in arb_dag()) {
        let graph = build_graph(n, &edges);
        let result = shortest_paths(&graph, 0, &mut NoopMetrics).expect("acyclic");

        prop_assert!(result.distance(0).abs() < f64::EPSILON);
        for u in 0..n {
            if !result.is_reachable(u) {
                continue;
            }
            for edge in graph.edges_of(u) {
                prop_assert!(
                    result.distance(edge.to) <= result.distance(u) + edge.weight + 1e-12
                );
            }
        }
    }

    #[test]
    fn prop_longest_fixed_point_on_dags((n, edges) in arb_dag()) {
        let graph = build_graph(n, &edges);
        let result = longest_paths(&graph, 0, &mut NoopMetrics).expect("acyclic");

        for u in 0..n {
            if !result.is_reachable(u) {
                continue;
            }
            for edge in graph.edges_of(u) {
                prop_assert!(
                    result.distance(edge.to) >= result.distance(u) + edge.weight - 1e-12
                );
            }
        }
    }

    #[test]
    fn prop_path_engine_idempotent((n, edges) in arb_dag()) {
        let graph = build_graph(n, &edges);

        let first = longest_paths(&graph, 0, &mut NoopMetrics).expect("acyclic");
        let second = longest_paths(&graph, 0, &mut NoopMetrics).expect("acyclic");

        prop_assert_eq!(first.distances(), second.distances());
        prop_assert_eq!(first.predecessors(), second.predecessors());
    }
}

// ---------------------------------------------------------------------------
// Deterministic end-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn mixed_workflow_end_to_end() {
    // Task graph with one cycle (1 ⇄ 2) and an alternative route 0 → 4.
    let mut graph = Graph::new(5, true);
    graph.add_edge(0, 1, 10.0).expect("in range");
    graph.add_edge(1, 2, 15.0).expect("in range");
    graph.add_edge(2, 1, 5.0).expect("in range");
    graph.add_edge(1, 3, 20.0).expect("in range");
    graph.add_edge(3, 4, 25.0).expect("in range");
    graph.add_edge(0, 4, 50.0).expect("in range");

    let order = plan_order(&graph, &mut NoopMetrics).expect("directed input");

    // The cycle collapses: 4 components, {1, 2} fused.
    assert_eq!(order.scc().num_components(), 4);
    assert!(order.scc().in_same_component(1, 2));
    assert_eq!(order.component_order().len(), 4);
    assert_eq!(order.vertex_order().len(), 5);

    // The raw graph is cyclic, so path queries reject it...
    assert!(shortest_paths(&graph, 0, &mut NoopMetrics).is_err());

    // ...but the condensation supports them.
    let dag = order.condensation().dag();
    let source = order.condensation().component_of(0);
    let result = shortest_paths(dag, source, &mut NoopMetrics).expect("condensation is a DAG");
    for component in 0..dag.num_vertices() {
        assert!(result.is_reachable(component), "0 reaches every component");
    }
}

#[test]
fn acyclic_workflow_critical_path() {
    // Diamond with asymmetric durations: the heavy side is critical.
    let mut graph = Graph::new(4, true);
    graph.add_edge(0, 1, 10.0).expect("in range");
    graph.add_edge(0, 2, 15.0).expect("in range");
    graph.add_edge(1, 3, 20.0).expect("in range");
    graph.add_edge(2, 3, 25.0).expect("in range");

    let longest = longest_paths(&graph, 0, &mut NoopMetrics).expect("acyclic");
    assert!((longest.distance(3) - 40.0).abs() < 1e-12);
    assert_eq!(longest.critical_path(), Some(vec![0, 2, 3]));

    let shortest = shortest_paths(&graph, 0, &mut NoopMetrics).expect("acyclic");
    assert!((shortest.distance(3) - 30.0).abs() < 1e-12);
    assert_eq!(shortest.path(3), Some(vec![0, 1, 3]));
}
