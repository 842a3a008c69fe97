mod config;
mod controllers;
mod models;
mod routes;
mod services;
mod utils;

use crate::config::loader::Config;
use crate::models::progress_dto::ProgressReport;
use crate::routes::router::{create_routes, AppState};
use crate::services::runner;
use crate::services::target::HttpTarget;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio_schedule::{every, Job};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let scenario_path = std::env::args().nth(1);
    let config = Config::new(scenario_path.as_deref())?;

    let run_id = uuid::Uuid::new_v4();
    info!(
        "run {}: {} vus for {}s against {}",
        run_id, config.options.vus, config.options.duration_secs, config.target.url
    );

    let progress = Arc::new(RwLock::new(ProgressReport::new(run_id, config.options.vus)));
    let started = Instant::now();
    let cancel = CancellationToken::new();

    // Ctrl-C aborts the run; the partial summary is still reported.
    let abort = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping virtual users");
            abort.cancel();
        }
    });

    if config.status_api.enabled {
        let app = create_routes(AppState {
            progress: progress.clone(),
            started,
        });
        let listener = TcpListener::bind(config.status_api.addr.as_str()).await?;
        info!("status api listening on {}", listener.local_addr()?);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                error!("status api failed: {}", e);
            }
        });
    }

    let reporter_progress = progress.clone();
    let reporter = every(10).seconds().perform(move || {
        let progress = reporter_progress.clone();
        async move {
            let p = progress.read().await.clone();
            info!(
                "progress: {} iterations, {} checks passed, {} failed",
                p.iterations, p.checks_passed, p.checks_failed
            );
        }
    });
    tokio::spawn(reporter);

    let target = HttpTarget::new(config.target.url.clone());
    let summary = runner::run(run_id, &config, target, progress, cancel).await?;

    println!("{}", utils::fmt::render_summary(&summary));

    if let Some(path) = &config.report.json_path {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        info!("summary written to {}", path.display());
    }

    Ok(())
}
