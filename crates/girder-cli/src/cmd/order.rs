//! `girder order`: topological sort of the graph exactly as given.
//!
//! Unlike `analyze`, this command does not condense cycles away — a
//! cyclic graph is reported as having no ordering, which is a legitimate
//! verdict rather than an error.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use girder_core::{GraphError, KahnSorter, Metrics, TopologicalSorter};
use serde_json::json;

use crate::output::{OutputMode, emit_json};

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Graph description file (JSON).
    pub file: PathBuf,
}

pub fn run(args: &OrderArgs, mode: OutputMode, metrics: &mut dyn Metrics) -> Result<()> {
    let (_, graph) = super::load(&args.file)?;

    match KahnSorter.sort(&graph, metrics) {
        Ok(order) => {
            if mode.is_json() {
                emit_json(&json!({ "order": order, "cycle": false }))?;
            } else {
                println!("Topological order: {order:?}");
            }
        }
        Err(GraphError::CycleDetected) => {
            if mode.is_json() {
                emit_json(&json!({ "order": null, "cycle": true }))?;
            } else {
                println!("No ordering available: graph contains a cycle.");
                println!("Run `girder analyze` to collapse cycles into components.");
            }
        }
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
