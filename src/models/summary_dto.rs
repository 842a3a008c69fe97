use crate::models::check_dto::{CheckStats, IterationRecord};
use crate::models::status_dto::RunState;
use hdrhistogram::Histogram;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Raw totals collected while the run is live.
#[derive(Debug)]
pub struct RunTotals {
    pub iterations: u64,
    pub transport_errors: u64,
    pub checks: Vec<CheckStats>,
    pub latencies: Histogram<u64>,
}

impl RunTotals {
    pub fn new(check_names: Vec<String>) -> RunTotals {
        RunTotals {
            iterations: 0,
            transport_errors: 0,
            checks: check_names
                .into_iter()
                .map(|name| CheckStats {
                    name,
                    passes: 0,
                    fails: 0,
                })
                .collect(),
            // 3 significant figures, auto-resizing; infallible for 0..=5
            latencies: Histogram::<u64>::new(3).unwrap(),
        }
    }

    pub fn record(&mut self, record: &IterationRecord) {
        self.iterations += 1;
        if record.transport_error {
            self.transport_errors += 1;
        }
        if let Some(latency) = record.latency {
            // auto-resizing, cannot reject in-range values
            let _ = self.latencies.record(latency.as_millis() as u64);
        }
        for outcome in &record.outcomes {
            if let Some(stats) = self.checks.iter_mut().find(|c| c.name == outcome.name) {
                if outcome.passed {
                    stats.passes += 1;
                } else {
                    stats.fails += 1;
                }
            }
        }
    }

    pub fn checks_passed(&self) -> u64 {
        self.checks.iter().map(|c| c.passes).sum()
    }

    pub fn checks_failed(&self) -> u64 {
        self.checks.iter().map(|c| c.fails).sum()
    }
}

/// Final report for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub state: RunState,
    pub vus: u32,
    pub total_time_seconds: f64,
    pub iterations: u64,
    pub requests_per_second: f64,
    pub checks_passed: u64,
    pub checks_failed: u64,
    pub transport_errors: u64,
    pub min_latency_ms: u64,
    pub avg_latency_ms: f64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
    pub max_latency_ms: u64,
    pub checks: Vec<CheckStats>,
}

impl RunSummary {
    pub fn new(
        run_id: Uuid,
        state: RunState,
        vus: u32,
        elapsed: Duration,
        totals: RunTotals,
    ) -> RunSummary {
        let total_time_seconds = elapsed.as_secs_f64();
        let requests_per_second = if total_time_seconds > 0.0 {
            totals.iterations as f64 / total_time_seconds
        } else {
            0.0
        };

        RunSummary {
            run_id,
            state,
            vus,
            total_time_seconds,
            iterations: totals.iterations,
            requests_per_second,
            checks_passed: totals.checks_passed(),
            checks_failed: totals.checks_failed(),
            transport_errors: totals.transport_errors,
            min_latency_ms: totals.latencies.min(),
            avg_latency_ms: totals.latencies.mean(),
            p50_latency_ms: totals.latencies.value_at_percentile(50.0),
            p90_latency_ms: totals.latencies.value_at_percentile(90.0),
            p99_latency_ms: totals.latencies.value_at_percentile(99.0),
            max_latency_ms: totals.latencies.max(),
            checks: totals.checks,
        }
    }
}
