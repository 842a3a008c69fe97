use crate::models::progress_dto::ProgressReport;
use crate::models::status_dto::RunState;
use crate::routes::router::AppState;
use axum::extract::State;
use axum::Json;
use utoipa;

#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Current run progress", body = ProgressReport)
    ),
    tag = "status"
)]
pub async fn status(State(state): State<AppState>) -> Json<ProgressReport> {
    let mut report = state.progress.read().await.clone();
    // terminal states carry their final elapsed time
    if report.state == RunState::Pending || report.state == RunState::Running {
        report.elapsed_secs = state.started.elapsed().as_secs_f64();
    }
    Json(report)
}
