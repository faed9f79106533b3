use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's ranking data as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub indian_rank: i64,
    pub name: String,
    pub title: String,
    pub federation: String,
    pub rating: i64,
    pub birth_year: i64,
    pub scraped_at: DateTime<Utc>,
}

/// Case-insensitive substring filter on the player name.
///
/// The query text is matched literally. An absent or empty query selects every
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameFilter {
    #[default]
    All,
    Contains(String),
}

impl NameFilter {
    pub fn from_query(query: Option<&str>) -> Self {
        match query {
            None | Some("") => NameFilter::All,
            Some(text) => NameFilter::Contains(text.to_string()),
        }
    }

    pub fn needle(&self) -> Option<&str> {
        match self {
            NameFilter::All => None,
            NameFilter::Contains(text) => Some(text),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Contains(text) => name.to_lowercase().contains(&text.to_lowercase()),
        }
    }
}

pub type ArcPlayerRepository = Arc<Box<dyn PlayerRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait PlayerRepository {
    /// Returns every record accepted by `filter`, ascending by indian rank,
    /// ties broken by id.
    async fn find_players(&self, filter: &NameFilter) -> ServiceResult<Vec<PlayerRecord>>;
}

pub type ArcPlayerService = Arc<Box<dyn PlayerService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait PlayerService {
    async fn list_players(&self, query: Option<&str>) -> ServiceResult<Vec<PlayerRecord>>;
}

pub struct PlayerServiceImpl {
    player_repository: ArcPlayerRepository,
}

impl PlayerServiceImpl {
    pub fn new(player_repository: ArcPlayerRepository) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl PlayerService for PlayerServiceImpl {
    async fn list_players(&self, query: Option<&str>) -> ServiceResult<Vec<PlayerRecord>> {
        let filter = NameFilter::from_query(query);
        let players = self.player_repository.find_players(&filter).await?;
        debug!(
            "Listed {} players for filter {:?}",
            players.len(),
            filter.needle()
        );
        Ok(players)
    }
}

#[cfg(test)]
pub(crate) fn test_player(id: i64, indian_rank: i64, name: &str) -> PlayerRecord {
    PlayerRecord {
        id: PlayerId(id),
        indian_rank,
        name: name.to_string(),
        title: "GM".to_string(),
        federation: "IND".to_string(),
        rating: 2800 - indian_rank,
        birth_year: 1990,
        scraped_at: DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default(),
    }
}
