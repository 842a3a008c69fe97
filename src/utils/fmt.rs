use crate::models::summary_dto::RunSummary;
use std::fmt::Write;

/// End-of-run report printed to stdout.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "run {} {} ({:.1}s, {} vus)",
        summary.run_id, summary.state, summary.total_time_seconds, summary.vus
    );
    let _ = writeln!(
        out,
        "  iterations ........ {} ({:.2}/s)",
        summary.iterations, summary.requests_per_second
    );
    let _ = writeln!(
        out,
        "  checks ............ {} passed, {} failed",
        summary.checks_passed, summary.checks_failed
    );
    for check in &summary.checks {
        let _ = writeln!(
            out,
            "    {} ... {}/{}",
            check.name,
            check.passes,
            check.passes + check.fails
        );
    }
    let _ = writeln!(
        out,
        "  latency (ms) ...... min={} avg={:.1} p50={} p90={} p99={} max={}",
        summary.min_latency_ms,
        summary.avg_latency_ms,
        summary.p50_latency_ms,
        summary.p90_latency_ms,
        summary.p99_latency_ms,
        summary.max_latency_ms
    );
    let _ = write!(
        out,
        "  transport errors .. {}",
        summary.transport_errors
    );

    out
}
