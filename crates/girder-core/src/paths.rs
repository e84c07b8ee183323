//! Single-source shortest and longest paths on directed acyclic graphs.
//!
//! # Algorithm
//!
//! Dynamic-programming relaxation in topological order: obtain a
//! topological ordering (computed internally on every invocation — no
//! caller-supplied order is trusted), set `distance[source] = 0` and all
//! other distances to the mode's sentinel (`+∞` when minimizing, `−∞`
//! when maximizing), then process vertices strictly in that order,
//! relaxing every outgoing edge of each vertex whose distance is already
//! known. Vertices still at the sentinel are skipped — relaxation never
//! propagates through an unreached vertex.
//!
//! Comparisons are strict (`<` / `>`), so the first improving edge in
//! adjacency order wins ties; re-running on an unmodified graph yields
//! bit-identical distance tables and identical predecessor chains.
//!
//! In a scheduling interpretation the longest path is the critical path:
//! the chain of tasks whose total duration bounds project completion.

use std::fmt;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::metrics::Metrics;
use crate::topo::{KahnSorter, TopologicalSorter};

/// Relaxation direction for the path engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Minimize cumulative weight; unreached vertices sit at `+∞`.
    Shortest,
    /// Maximize cumulative weight; unreached vertices sit at `−∞`.
    Longest,
}

impl PathMode {
    const fn sentinel(self) -> f64 {
        match self {
            Self::Shortest => f64::INFINITY,
            Self::Longest => f64::NEG_INFINITY,
        }
    }

    fn improves(self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Shortest => candidate < current,
            Self::Longest => candidate > current,
        }
    }

    const fn timer(self) -> &'static str {
        match self {
            Self::Shortest => "dag_shortest_paths",
            Self::Longest => "dag_longest_paths",
        }
    }
}

/// Immutable result of one path computation.
///
/// Internal tables are copied in at construction and copied out of every
/// whole-array accessor, so a result can never be mutated through a
/// caller-held reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
    source: usize,
    mode: PathMode,
}

impl PathResult {
    fn new(
        distances: &[f64],
        predecessors: &[Option<usize>],
        source: usize,
        mode: PathMode,
    ) -> Self {
        Self {
            distances: distances.to_vec(),
            predecessors: predecessors.to_vec(),
            source,
            mode,
        }
    }

    /// Distance from the source to `vertex`.
    ///
    /// Unreached vertices report the mode's sentinel (`±∞`).
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range for the analyzed graph.
    #[must_use]
    pub fn distance(&self, vertex: usize) -> f64 {
        self.distances[vertex]
    }

    /// A copy of the full distance table, indexed by vertex.
    #[must_use]
    pub fn distances(&self) -> Vec<f64> {
        self.distances.clone()
    }

    /// A copy of the full predecessor table, indexed by vertex.
    #[must_use]
    pub fn predecessors(&self) -> Vec<Option<usize>> {
        self.predecessors.clone()
    }

    /// Whether `vertex` is reachable from the source.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range for the analyzed graph.
    #[must_use]
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distances[vertex].is_finite()
    }

    /// The path from the source to `target`, or `None` when unreachable.
    ///
    /// # Panics
    ///
    /// Panics if `target` is out of range for the analyzed graph.
    #[must_use]
    pub fn path(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(vertex) = current {
            path.push(vertex);
            current = self.predecessors[vertex];
        }
        path.reverse();
        Some(path)
    }

    /// The source vertex this result was computed from.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Whether this result holds shortest or longest distances.
    #[must_use]
    pub const fn mode(&self) -> PathMode {
        self.mode
    }

    /// End vertex of the critical path: the reachable vertex with the
    /// greatest distance. The lowest such index wins ties.
    ///
    /// Only meaningful for longest-path results; returns `None` on
    /// shortest-mode results and on empty graphs.
    #[must_use]
    pub fn critical_target(&self) -> Option<usize> {
        if self.mode != PathMode::Longest {
            return None;
        }

        let mut target = None;
        let mut best = f64::NEG_INFINITY;
        for (vertex, &distance) in self.distances.iter().enumerate() {
            if distance.is_finite() && distance > best {
                best = distance;
                target = Some(vertex);
            }
        }
        target
    }

    /// The critical path from this result's source, or `None` for
    /// shortest-mode results and empty graphs.
    #[must_use]
    pub fn critical_path(&self) -> Option<Vec<usize>> {
        self.critical_target().and_then(|target| self.path(target))
    }

    /// Total weight of the critical path; 0.0 when there is none.
    #[must_use]
    pub fn critical_path_length(&self) -> f64 {
        self.critical_target()
            .map_or(0.0, |target| self.distances[target])
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== {} Path Result (source: {}) ===",
            match self.mode {
                PathMode::Shortest => "Shortest",
                PathMode::Longest => "Longest",
            },
            self.source
        )?;

        for vertex in 0..self.distances.len() {
            if self.is_reachable(vertex) {
                writeln!(
                    f,
                    "Vertex {vertex}: distance = {:.2}, path = {:?}",
                    self.distances[vertex],
                    self.path(vertex).unwrap_or_default()
                )?;
            } else {
                writeln!(f, "Vertex {vertex}: unreachable")?;
            }
        }

        if self.mode == PathMode::Longest {
            if let Some(path) = self.critical_path() {
                writeln!(
                    f,
                    "Critical path: {path:?} (length: {:.2})",
                    self.critical_path_length()
                )?;
            }
        }

        Ok(())
    }
}

/// Single-source shortest paths over a DAG.
///
/// Counters reported: `vertex_relaxations`, `edge_relaxations`,
/// `distance_updates`. Timer: `dag_shortest_paths`.
///
/// # Errors
///
/// - [`GraphError::UndirectedInput`] for undirected graphs.
/// - [`GraphError::VertexOutOfRange`] for a bad source index.
/// - [`GraphError::CycleDetected`] when the graph is not acyclic; no
///   partial distance table is produced.
pub fn shortest_paths(
    graph: &Graph,
    source: usize,
    metrics: &mut dyn Metrics,
) -> Result<PathResult, GraphError> {
    relax_in_topo_order(graph, source, PathMode::Shortest, metrics)
}

/// Single-source longest paths over a DAG.
///
/// Counters reported: `vertex_relaxations`, `edge_relaxations`,
/// `distance_updates`. Timer: `dag_longest_paths`.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`].
pub fn longest_paths(
    graph: &Graph,
    source: usize,
    metrics: &mut dyn Metrics,
) -> Result<PathResult, GraphError> {
    relax_in_topo_order(graph, source, PathMode::Longest, metrics)
}

/// Global critical path: the longest path anywhere in the DAG.
///
/// Tries every vertex as a source and keeps the longest result (strict
/// comparison, so the lowest-index source wins ties). This is O(V) full
/// relaxations — quadratic overall — and intended for small graphs.
/// Returns `Ok(None)` for a graph with no vertices.
/// Timer: `dag_critical_path`.
///
/// # Errors
///
/// Same conditions as [`shortest_paths`], reported from the first
/// per-source computation that fails.
#[instrument(skip_all)]
pub fn critical_path(
    graph: &Graph,
    metrics: &mut dyn Metrics,
) -> Result<Option<PathResult>, GraphError> {
    metrics.start_timing("dag_critical_path");

    let mut best: Option<PathResult> = None;
    let mut best_length = f64::NEG_INFINITY;

    for source in 0..graph.num_vertices() {
        let result = match longest_paths(graph, source, metrics) {
            Ok(result) => result,
            Err(err) => {
                metrics.stop_timing("dag_critical_path");
                return Err(err);
            }
        };

        let length = result.critical_path_length();
        if length > best_length {
            best_length = length;
            best = Some(result);
        }
    }

    metrics.stop_timing("dag_critical_path");
    Ok(best)
}

#[instrument(skip(graph, metrics))]
fn relax_in_topo_order(
    graph: &Graph,
    source: usize,
    mode: PathMode,
    metrics: &mut dyn Metrics,
) -> Result<PathResult, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::UndirectedInput {
            algorithm: "DAG path relaxation",
        });
    }
    if source >= graph.num_vertices() {
        return Err(GraphError::VertexOutOfRange {
            vertex: source,
            num_vertices: graph.num_vertices(),
        });
    }

    metrics.start_timing(mode.timer());

    let order = match KahnSorter.sort(graph, metrics) {
        Ok(order) => order,
        Err(err) => {
            metrics.stop_timing(mode.timer());
            return Err(err);
        }
    };

    let n = graph.num_vertices();
    let mut distances = vec![mode.sentinel(); n];
    let mut predecessors: Vec<Option<usize>> = vec![None; n];
    distances[source] = 0.0;

    for &u in &order {
        if distances[u].is_infinite() {
            // Still at the sentinel: never relax through an unreached vertex.
            continue;
        }
        metrics.increment("vertex_relaxations");

        for edge in graph.edges_of(u) {
            let candidate = distances[u] + edge.weight;
            metrics.increment("edge_relaxations");

            if mode.improves(candidate, distances[edge.to]) {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(u);
                metrics.increment("distance_updates");
            }
        }
    }

    metrics.stop_timing(mode.timer());
    debug!(source, ?mode, "relaxation complete");

    Ok(PathResult::new(&distances, &predecessors, source, mode))
}
