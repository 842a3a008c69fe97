use crate::models::status_dto::RunState;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

/// Handle the aggregator writes through and the status API reads from.
pub type SharedProgress = Arc<RwLock<ProgressReport>>;

/// Live view of the current run, served by the status API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProgressReport {
    #[schema(value_type = String)]
    pub run_id: Uuid,
    pub state: RunState,
    pub vus: u32,
    pub elapsed_secs: f64,
    pub iterations: u64,
    pub checks_passed: u64,
    pub checks_failed: u64,
    pub transport_errors: u64,
}

impl ProgressReport {
    pub fn new(run_id: Uuid, vus: u32) -> ProgressReport {
        ProgressReport {
            run_id,
            state: RunState::Pending,
            vus,
            elapsed_secs: 0.0,
            iterations: 0,
            checks_passed: 0,
            checks_failed: 0,
            transport_errors: 0,
        }
    }
}
