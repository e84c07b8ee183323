//! Command handlers for the `girder` binary.

pub mod analyze;
pub mod critical;
pub mod order;
pub mod paths;

use std::path::Path;

use anyhow::{Context, Result};
use girder_core::{Graph, GraphRecord};
use tracing::debug;

/// Load a JSON graph record from `path` and build its in-memory graph.
///
/// A malformed vertex reference in the record fails here, before any
/// analysis runs.
pub fn load(path: &Path) -> Result<(GraphRecord, Graph)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read graph file {}", path.display()))?;
    let record: GraphRecord = serde_json::from_str(&text)
        .with_context(|| format!("parse graph file {}", path.display()))?;
    let graph = record
        .to_graph()
        .with_context(|| format!("build graph from {}", path.display()))?;
    debug!(
        vertices = graph.num_vertices(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok((record, graph))
}
