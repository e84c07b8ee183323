//! Instrumentation sink for counters and interval timers.
//!
//! Every algorithm in this crate receives a `&mut dyn Metrics` and reports
//! progress into it: how many vertices it visited, how many edges it
//! relaxed, how long the whole pass took. Algorithms only ever write —
//! no control flow depends on a counter value — so a no-op sink
//! ([`NoopMetrics`]) is always a valid substitute and is what derived
//! checks like [`crate::topo::TopologicalSorter::is_dag`] use internally.
//!
//! Names are free-form strings. Reading a counter or timer that was never
//! written returns zero.
//!
//! The sink is single-threaded by design: it is borrowed exclusively for
//! the duration of one algorithm invocation and requires no locking.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Capability interface for recording counters and named interval timers.
pub trait Metrics {
    /// Add 1 to the named counter.
    fn increment(&mut self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Add `amount` to the named counter.
    fn increment_by(&mut self, name: &str, amount: u64);

    /// Current value of the named counter; unknown names read as 0.
    fn counter(&self, name: &str) -> u64;

    /// Open the named timing interval.
    fn start_timing(&mut self, name: &str);

    /// Close the named timing interval and record its duration.
    ///
    /// Closing an interval that was never opened is a no-op.
    fn stop_timing(&mut self, name: &str);

    /// Last recorded duration for the named interval; unknown names read
    /// as [`Duration::ZERO`].
    fn time(&self, name: &str) -> Duration;

    /// Discard all counters, timings, and open intervals.
    fn reset(&mut self);

    /// Human-readable rendering of everything recorded so far.
    fn summary(&self) -> String;
}

// ---------------------------------------------------------------------------
// MetricsRecorder
// ---------------------------------------------------------------------------

/// In-memory [`Metrics`] implementation backed by ordered maps.
///
/// `BTreeMap` keeps [`Metrics::summary`] output deterministic, which the
/// CLI relies on when printing the `--timing` report.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    counters: BTreeMap<String, u64>,
    timings: BTreeMap<String, Duration>,
    started: BTreeMap<String, Instant>,
}

impl MetricsRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Metrics for MetricsRecorder {
    fn increment_by(&mut self, name: &str, amount: u64) {
        *self.counters.entry(name.to_string()).or_insert(0) += amount;
    }

    fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    fn start_timing(&mut self, name: &str) {
        self.started.insert(name.to_string(), Instant::now());
    }

    fn stop_timing(&mut self, name: &str) {
        if let Some(started) = self.started.remove(name) {
            self.timings.insert(name.to_string(), started.elapsed());
        }
    }

    fn time(&self, name: &str) -> Duration {
        self.timings.get(name).copied().unwrap_or(Duration::ZERO)
    }

    fn reset(&mut self) {
        self.counters.clear();
        self.timings.clear();
        self.started.clear();
    }

    fn summary(&self) -> String {
        let mut out = String::from("=== Metrics Summary ===\n");

        if !self.counters.is_empty() {
            out.push_str("Counters:\n");
            for (name, value) in &self.counters {
                out.push_str(&format!("  {name}: {value}\n"));
            }
        }

        if !self.timings.is_empty() {
            out.push_str("Timings:\n");
            for (name, duration) in &self.timings {
                out.push_str(&format!("  {name}: {}\n", format_duration(*duration)));
            }
        }

        out
    }
}

// ---------------------------------------------------------------------------
// NoopMetrics
// ---------------------------------------------------------------------------

/// [`Metrics`] implementation that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn increment_by(&mut self, _name: &str, _amount: u64) {}

    fn counter(&self, _name: &str) -> u64 {
        0
    }

    fn start_timing(&mut self, _name: &str) {}

    fn stop_timing(&mut self, _name: &str) {}

    fn time(&self, _name: &str) -> Duration {
        Duration::ZERO
    }

    fn reset(&mut self) {}

    fn summary(&self) -> String {
        String::new()
    }
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        let secs = micros / 1_000_000;
        let millis = (micros % 1_000_000) / 1_000;
        format!("{secs}.{millis:03}s")
    } else if micros >= 1_000 {
        let millis = micros / 1_000;
        let rem = micros % 1_000;
        format!("{millis}.{rem:03}ms")
    } else {
        format!("{micros}µs")
    }
}
