#![forbid(unsafe_code)]
//! Core graph algorithms for dependency scheduling.
//!
//! # Overview
//!
//! This crate analyzes directed task-dependency graphs for scheduling:
//! it detects cyclic dependency clusters, collapses them into an acyclic
//! condensation, linearizes tasks into a valid execution order, and
//! computes minimum/maximum cumulative-duration paths (including the
//! critical path) through the resulting DAG.
//!
//! ## Pipeline
//!
//! ```text
//! Graph (may contain cycles)
//!        ↓  scc::find_sccs
//! SccResult (partition, ids in topological order)
//!        ↓  condense::condense
//! Condensation (fresh DAG over component ids)
//!        ↓  topo::KahnSorter
//! component + vertex execution order        [order::plan_order]
//!
//! any acyclic Graph
//!        ↓  paths::{shortest_paths, longest_paths, critical_path}
//! PathResult (distance/predecessor tables)
//! ```
//!
//! Everything is single-threaded and one-shot: each invocation owns its
//! working state and returns an immutable result. Algorithms report
//! counters and timings into an injected [`metrics::Metrics`] sink and
//! never read decisions back from it.
//!
//! # Conventions
//!
//! - **Errors**: every fallible operation returns a `Result` with
//!   [`GraphError`]; failures are synchronous, local, and never leave
//!   partial results behind.
//! - **Logging**: `tracing` macros; the library never installs a
//!   subscriber.

pub mod condense;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod order;
pub mod paths;
pub mod record;
pub mod scc;
pub mod topo;

pub use condense::{Condensation, condense};
pub use error::GraphError;
pub use graph::{DEFAULT_WEIGHT, Edge, Graph};
pub use metrics::{Metrics, MetricsRecorder, NoopMetrics};
pub use order::{ExecutionOrder, plan_order};
pub use paths::{PathMode, PathResult, critical_path, longest_paths, shortest_paths};
pub use record::{EdgeRecord, GraphRecord};
pub use scc::{SccResult, find_sccs};
pub use topo::{KahnSorter, TopologicalSorter};
