use std::str::FromStr;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub mod players;

pub use players::SqlitePlayerRepository;

/// Reference layout of the player table.
pub const CHESS_PLAYERS_SCHEMA: &str = include_str!("../sql/chess_players.sql");

/// Opens a read-only pool on the player store.
///
/// `database_url` is either a `sqlite:` URL or a plain file path. Connections
/// are established lazily, so an unreachable store surfaces on first use.
pub fn create_player_db_pool(database_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    let conn_options = if database_url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database_url)?
    } else {
        SqliteConnectOptions::new().filename(database_url)
    };
    let conn_options = conn_options.create_if_missing(false).read_only(true);

    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(conn_options))
}
