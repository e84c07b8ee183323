//! `girder analyze`: component detection, condensation, execution order.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use girder_core::{Metrics, plan_order};
use serde_json::json;

use crate::output::{OutputMode, emit_json};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Graph description file (JSON).
    pub file: PathBuf,
}

pub fn run(args: &AnalyzeArgs, mode: OutputMode, metrics: &mut dyn Metrics) -> Result<()> {
    let (_, graph) = super::load(&args.file)?;
    let order = plan_order(&graph, metrics)?;

    if mode.is_json() {
        let condensation = order.condensation();
        emit_json(&json!({
            "num_vertices": graph.num_vertices(),
            "num_edges": graph.edge_count(),
            "components": order.scc().components(),
            "num_components": order.scc().num_components(),
            "has_cycles": !order.scc().all_singletons(),
            "condensation": {
                "num_components": condensation.num_components(),
                "num_edges": condensation.dag().edge_count(),
                "compression_ratio": condensation.compression_ratio(),
                "component_sizes": condensation.component_sizes(),
            },
            "component_order": order.component_order(),
            "vertex_order": order.vertex_order(),
        }))?;
    } else {
        print!("{}", order.scc());
        print!("{}", order.condensation());
        print!("{order}");
    }

    Ok(())
}
