use crate::config::loader::Config;
use crate::models::check_dto::IterationRecord;
use crate::services::checks::StatusCheck;
use crate::services::target::{Target, TargetError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One virtual user: post a fresh payload, evaluate the checks, report the
/// iteration, pause, repeat until cancelled. A failed check or transport
/// error never stops the loop.
pub async fn drive<T: Target>(
    vu: u32,
    target: &T,
    config: &Config,
    checks: &[StatusCheck],
    cancel: CancellationToken,
    tx: mpsc::Sender<IterationRecord>,
) {
    while !cancel.is_cancelled() {
        let payload = config.article_payload();

        let record = match target.post(&payload).await {
            Ok(observation) => IterationRecord {
                vu,
                latency: Some(observation.latency),
                status: Some(observation.status.as_u16()),
                outcomes: checks
                    .iter()
                    .map(|c| c.evaluate(Some(observation.status)))
                    .collect(),
                transport_error: false,
            },
            Err(TargetError::RequestFailed(e)) => {
                warn!("vu {}: request failed: {}", vu, e);
                IterationRecord {
                    vu,
                    latency: None,
                    status: None,
                    outcomes: checks.iter().map(|c| c.evaluate(None)).collect(),
                    transport_error: true,
                }
            }
        };

        if tx.send(record).await.is_err() {
            // aggregator is gone, nothing left to report to
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(config.pacing()) => {}
        }
    }

    debug!("vu {} stopped", vu);
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::models::payload_dto::ArticlePayload;
    use crate::services::checks::default_checks;
    use crate::services::target::Observation;
    use axum::http::StatusCode;
    use std::time::Duration;

    struct OkTarget;
    struct ServerErrorTarget;
    struct DownTarget;

    impl Target for OkTarget {
        async fn post(&self, _p: &ArticlePayload) -> Result<Observation, TargetError> {
            Ok(Observation {
                status: StatusCode::OK,
                latency: Duration::from_millis(5),
            })
        }
    }

    impl Target for ServerErrorTarget {
        async fn post(&self, _p: &ArticlePayload) -> Result<Observation, TargetError> {
            Ok(Observation {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                latency: Duration::from_millis(5),
            })
        }
    }

    impl Target for DownTarget {
        async fn post(&self, _p: &ArticlePayload) -> Result<Observation, TargetError> {
            // harvest a genuine reqwest error without touching the network
            let error = reqwest::Client::new()
                .post("http://")
                .send()
                .await
                .unwrap_err();
            Err(TargetError::RequestFailed(error))
        }
    }

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.options.pacing_secs = 0.0;
        config
    }

    async fn collect_records<T: Target>(target: T, wanted: usize) -> Vec<IterationRecord> {
        let config = fast_config();
        let checks = default_checks(config.target.expected_status);
        let cancel = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel(16);

        let driver = drive(0, &target, &config, &checks, cancel.clone(), tx);
        let collector = async {
            let mut records = Vec::new();
            while records.len() < wanted {
                records.push(rx.recv().await.unwrap());
            }
            cancel.cancel();
            records
        };

        let (_, records) = tokio::join!(driver, collector);
        records
    }

    #[tokio::test]
    async fn test_passing_iterations_are_recorded() {
        let records = collect_records(OkTarget, 3).await;

        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.status, Some(200));
            assert!(record.latency.is_some());
            assert!(!record.transport_error);
            assert!(record.outcomes[0].passed);
        }
    }

    #[tokio::test]
    async fn test_failed_check_does_not_stop_the_loop() {
        let records = collect_records(ServerErrorTarget, 3).await;

        // the loop kept iterating after the first failure
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.status, Some(500));
            assert!(!record.outcomes[0].passed);
            assert!(!record.transport_error);
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_recorded_and_loop_continues() {
        let records = collect_records(DownTarget, 2).await;

        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.transport_error);
            assert_eq!(record.status, None);
            assert!(record.latency.is_none());
            assert!(!record.outcomes[0].passed);
        }
    }

    #[tokio::test]
    async fn test_cancelled_vu_stops_without_records() {
        let config = fast_config();
        let checks = default_checks(200);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (tx, mut rx) = mpsc::channel(16);

        drive(0, &OkTarget, &config, &checks, cancel, tx).await;

        assert!(rx.recv().await.is_none());
    }
}
