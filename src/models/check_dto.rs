use serde::Serialize;
use std::time::Duration;

/// Result of a single check evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
}

/// Aggregate pass/fail counters for one named check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckStats {
    pub name: String,
    pub passes: u64,
    pub fails: u64,
}

/// What a virtual user reports back after each iteration.
#[derive(Debug)]
pub struct IterationRecord {
    pub vu: u32,
    /// None when the request never produced a response.
    pub latency: Option<Duration>,
    pub status: Option<u16>,
    pub outcomes: Vec<CheckOutcome>,
    pub transport_error: bool,
}
