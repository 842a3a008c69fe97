use crate::config::loader::Config;
use crate::models::check_dto::IterationRecord;
use crate::models::progress_dto::SharedProgress;
use crate::models::status_dto::RunState;
use crate::models::summary_dto::{RunSummary, RunTotals};
use crate::services::checks;
use crate::services::target::Target;
use crate::services::vu;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Aggregation task failed: {0}")]
    AggregationFailed(tokio::task::JoinError),
    #[error("Deadline task failed: {0}")]
    DeadlineFailed(tokio::task::JoinError),
}

/// Drive a whole run: spawn the virtual users, collect their records, stop
/// everything at the deadline, and fold the totals into a summary.
pub async fn run<T: Target>(
    run_id: Uuid,
    config: &Config,
    target: T,
    progress: SharedProgress,
    cancel: CancellationToken,
) -> Result<RunSummary, RunError> {
    let checks = checks::default_checks(config.target.expected_status);
    let check_names = checks.iter().map(|c| c.name.clone()).collect();

    let (tx, rx) = mpsc::channel::<IterationRecord>(1024);
    progress.write().await.state = RunState::Running;
    let aggregator = tokio::spawn(aggregate(rx, RunTotals::new(check_names), progress.clone()));

    // The deadline completes the run unless an external abort gets there
    // first.
    let deadline = config.duration();
    let deadline_cancel = cancel.clone();
    let outcome = tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(deadline) => {
                debug!("deadline reached, stopping virtual users");
                deadline_cancel.cancel();
                RunState::Completed
            }
            _ = deadline_cancel.cancelled() => RunState::Aborted,
        }
    });

    let started = Instant::now();
    let workers = (0..config.options.vus)
        .map(|i| vu::drive(i, &target, config, &checks, cancel.clone(), tx.clone()));
    futures::future::join_all(workers).await;
    drop(tx);

    let state = outcome.await.map_err(RunError::DeadlineFailed)?;
    let totals = aggregator.await.map_err(RunError::AggregationFailed)?;
    let elapsed = started.elapsed();

    let summary = RunSummary::new(run_id, state, config.options.vus, elapsed, totals);
    {
        let mut p = progress.write().await;
        p.state = state;
        p.elapsed_secs = summary.total_time_seconds;
    }

    info!(
        "run {} {}: {} iterations, {} checks failed",
        run_id, state, summary.iterations, summary.checks_failed
    );
    Ok(summary)
}

async fn aggregate(
    mut rx: mpsc::Receiver<IterationRecord>,
    mut totals: RunTotals,
    progress: SharedProgress,
) -> RunTotals {
    while let Some(record) = rx.recv().await {
        debug!("vu {}: status {:?}", record.vu, record.status);
        totals.record(&record);

        let mut p = progress.write().await;
        p.iterations = totals.iterations;
        p.checks_passed = totals.checks_passed();
        p.checks_failed = totals.checks_failed();
        p.transport_errors = totals.transport_errors;
    }
    totals
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::models::payload_dto::ArticlePayload;
    use crate::models::progress_dto::ProgressReport;
    use crate::services::target::{Observation, TargetError};
    use axum::http::StatusCode;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;

    struct OkTarget;

    impl Target for OkTarget {
        async fn post(&self, _p: &ArticlePayload) -> Result<Observation, TargetError> {
            Ok(Observation {
                status: StatusCode::OK,
                latency: Duration::from_millis(1),
            })
        }
    }

    fn test_config(vus: u32, duration_secs: u64) -> Config {
        let mut config = Config::default();
        config.options.vus = vus;
        config.options.duration_secs = duration_secs;
        config.options.pacing_secs = 0.01;
        config
    }

    fn test_progress(run_id: Uuid, vus: u32) -> SharedProgress {
        Arc::new(RwLock::new(ProgressReport::new(run_id, vus)))
    }

    #[tokio::test]
    async fn test_run_completes_at_the_deadline() {
        let run_id = Uuid::new_v4();
        let config = test_config(3, 1);
        let progress = test_progress(run_id, 3);
        let cancel = CancellationToken::new();

        let summary = run(run_id, &config, OkTarget, progress.clone(), cancel)
            .await
            .unwrap();

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.vus, 3);
        assert!(summary.iterations > 0);
        assert_eq!(summary.checks_passed, summary.iterations);
        assert_eq!(summary.checks_failed, 0);
        assert_eq!(summary.transport_errors, 0);
        assert!(summary.requests_per_second > 0.0);

        let report = progress.read().await.clone();
        assert_eq!(report.state, RunState::Completed);
        assert_eq!(report.iterations, summary.iterations);
    }

    #[tokio::test]
    async fn test_external_cancel_aborts_the_run() {
        let run_id = Uuid::new_v4();
        let config = test_config(2, 60);
        let progress = test_progress(run_id, 2);
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        let (summary, _) = tokio::join!(
            run(run_id, &config, OkTarget, progress.clone(), cancel),
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                canceller.cancel();
            }
        );
        let summary = summary.unwrap();

        assert_eq!(summary.state, RunState::Aborted);
        // well under the configured 60s deadline
        assert!(summary.total_time_seconds < 5.0);
        assert_eq!(progress.read().await.state, RunState::Aborted);
    }

    #[tokio::test]
    async fn test_counters_are_consistent_for_the_single_check() {
        let run_id = Uuid::new_v4();
        let config = test_config(2, 1);
        let progress = test_progress(run_id, 2);

        let summary = run(
            run_id,
            &config,
            OkTarget,
            progress,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(summary.checks.len(), 1);
        assert_eq!(summary.checks[0].name, "status is 200");
        assert_eq!(
            summary.checks_passed + summary.checks_failed,
            summary.iterations
        );
    }
}
