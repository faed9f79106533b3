use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use chess_ratings_domain::player::ArcPlayerService;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod error;
mod players;

#[derive(Clone)]
pub struct AppState {
    pub player_service: ArcPlayerService,
}

/// Cross-origin access for the single configured front-end origin.
fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new().route("/players", get(players::list_players)),
        )
        .layer(cors_layer(cors_origin))
        .with_state(app_state)
}

pub async fn serve(
    listener: TcpListener,
    app_state: AppState,
    cors_origin: HeaderValue,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(app_state, cors_origin))
        .with_graceful_shutdown(shutdown_signal)
        .await
}

pub async fn run(
    app_state: AppState,
    addr: SocketAddr,
    cors_origin: HeaderValue,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("Server running on {}", listener.local_addr()?);
    serve(listener, app_state, cors_origin, shutdown_signal).await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}
