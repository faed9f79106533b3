use std::{process::ExitCode, sync::Arc};

use chess_ratings_domain::player::{ArcPlayerService, PlayerServiceImpl};
use chess_ratings_persistence_sqlite::{SqlitePlayerRepository, create_player_db_pool};
use log::{error, info};

use crate::{config::ServerConfig, http::AppState};

mod config;
mod http;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logs::init_logger(config.log_file.as_ref()) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let pool = match create_player_db_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            error!("Invalid DATABASE_URL: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let player_repo = SqlitePlayerRepository::new(pool.clone());
    match player_repo.ping().await {
        Ok(_) => info!("Connected to player store"),
        Err(e) => error!("Player store connection error: {}", e),
    }

    let player_service: ArcPlayerService = Arc::new(Box::new(PlayerServiceImpl::new(Arc::new(
        Box::new(player_repo),
    ))));

    info!("Starting application");

    let result = http::run(
        AppState { player_service },
        config.listen_addr(),
        config.cors_origin.clone(),
        shutdown_signal(),
    )
    .await;

    pool.close().await;
    info!("Player store connection closed");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("HTTP API failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
