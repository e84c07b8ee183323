//! `girder paths`: single-source shortest or longest path table.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use girder_core::{Graph, Metrics, PathResult, longest_paths, shortest_paths};
use serde_json::json;

use crate::output::{OutputMode, emit_json};

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Graph description file (JSON).
    pub file: PathBuf,

    /// Source vertex; overrides the file's "source" field.
    #[arg(long)]
    pub source: Option<usize>,

    /// Maximize cumulative weight instead of minimizing it.
    #[arg(long)]
    pub longest: bool,
}

pub fn run(args: &PathsArgs, mode: OutputMode, metrics: &mut dyn Metrics) -> Result<()> {
    let (record, graph) = super::load(&args.file)?;

    let Some(source) = args.source.or(record.source) else {
        bail!("no source vertex: pass --source or set \"source\" in the graph file");
    };

    let result = if args.longest {
        longest_paths(&graph, source, metrics)?
    } else {
        shortest_paths(&graph, source, metrics)?
    };

    if mode.is_json() {
        emit_json(&path_table_json(&graph, &result))?;
    } else {
        print!("{result}");
    }

    Ok(())
}

/// JSON rendering of a path table. Unreachable vertices get `null`
/// distances, keeping the document valid JSON (infinities are not).
pub fn path_table_json(graph: &Graph, result: &PathResult) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = (0..graph.num_vertices())
        .map(|vertex| {
            if result.is_reachable(vertex) {
                json!({
                    "vertex": vertex,
                    "distance": result.distance(vertex),
                    "path": result.path(vertex),
                })
            } else {
                json!({ "vertex": vertex, "distance": null, "path": null })
            }
        })
        .collect();

    json!({
        "source": result.source(),
        "longest": matches!(result.mode(), girder_core::PathMode::Longest),
        "vertices": rows,
    })
}
