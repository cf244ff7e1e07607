use std::process::ExitCode;

use platform_booking::config::AppConfig;
use platform_booking::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("platform_booking=info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let station = match config.build_station().await {
        Ok(station) => station,
        Err(e) => {
            error!("failed to build station: {e}");
            return ExitCode::FAILURE;
        }
    };

    let lines: Vec<String> = station.lines().await.into_iter().map(|l| l.name).collect();
    info!(
        identity = %station.describe_identity(),
        lines = ?lines,
        platforms = ?station.platform_ids().await,
        stoppage_mins = config.rules.stoppage_mins,
        through_mins = config.rules.through_mins,
        "station ready"
    );

    let app = create_router(AppState::new(station, config.service_date));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };
    info!("Platform booking listening on http://{}", config.bind_addr);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
