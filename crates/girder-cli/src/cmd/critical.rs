//! `girder critical`: critical path through the task DAG.
//!
//! With `--source`, runs one longest-path pass from that vertex. Without
//! it, tries every vertex as a source and keeps the globally longest
//! path — quadratic, fine for the project-sized graphs this tool targets.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use girder_core::{Metrics, critical_path, longest_paths};
use serde_json::json;

use crate::output::{OutputMode, emit_json};

#[derive(Args, Debug)]
pub struct CriticalArgs {
    /// Graph description file (JSON).
    pub file: PathBuf,

    /// Only consider paths starting at this vertex.
    #[arg(long)]
    pub source: Option<usize>,
}

pub fn run(args: &CriticalArgs, mode: OutputMode, metrics: &mut dyn Metrics) -> Result<()> {
    let (_, graph) = super::load(&args.file)?;

    let result = match args.source {
        Some(source) => Some(longest_paths(&graph, source, metrics)?),
        None => critical_path(&graph, metrics)?,
    };

    let Some(result) = result else {
        if mode.is_json() {
            emit_json(&json!({ "critical_path": null, "length": null }))?;
        } else {
            println!("Graph has no vertices; no critical path.");
        }
        return Ok(());
    };

    if mode.is_json() {
        emit_json(&json!({
            "source": result.source(),
            "critical_path": result.critical_path(),
            "target": result.critical_target(),
            "length": result.critical_path_length(),
        }))?;
    } else {
        match result.critical_path() {
            Some(path) => {
                let rendered: Vec<String> = path.iter().map(ToString::to_string).collect();
                println!(
                    "Critical path: {} (length: {:.2})",
                    rendered.join(" -> "),
                    result.critical_path_length()
                );
            }
            None => println!("No critical path from vertex {}.", result.source()),
        }
    }

    Ok(())
}
