use crate::models::health_dto::Health;
use axum::Json;
use utoipa;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Generator is alive", body = Health)
    ),
    tag = "health"
)]
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
