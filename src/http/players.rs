use axum::{
    Json,
    extract::{Query, State},
};
use chess_ratings_domain::player::PlayerRecord;
use log::debug;
use serde::Deserialize;

use crate::http::{AppState, error::ApiError};

#[derive(Deserialize)]
pub struct PlayersQuery {
    pub query: Option<String>,
}

#[axum::debug_handler]
pub async fn list_players(
    State(app_state): State<AppState>,
    Query(params): Query<PlayersQuery>,
) -> Result<Json<Vec<PlayerRecord>>, ApiError> {
    debug!("GET /api/players query={:?}", params.query);
    let players = app_state
        .player_service
        .list_players(params.query.as_deref())
        .await?;
    Ok(Json(players))
}
