use crate::controllers::health::__path_health;
use crate::controllers::health::health;
use crate::controllers::ping::ping;
use crate::controllers::status::__path_status;
use crate::controllers::status::status;
use crate::models::health_dto::Health;
use crate::models::progress_dto::{ProgressReport, SharedProgress};
use axum::{routing::get, Router};
use std::time::Instant;
use tower_http::trace;
use tower_http::trace::TraceLayer;
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared with the status-API handlers.
#[derive(Clone)]
pub struct AppState {
    pub progress: SharedProgress,
    pub started: Instant,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        status,
        health
    ),
    components(
        schemas(ProgressReport, Health)
    ),
    tags(
        (name = "status", description = "Run progress endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(ping))
        .route("/health", get(health))
        .route("/status", get(status))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
}
