use crate::{
    ServiceError, ServiceResult,
    player::{NameFilter, PlayerRecord, PlayerRepository},
};

/// Read-only repository over a fixed set of records.
///
/// A failing instance answers every lookup with an internal error.
pub struct MemoryPlayerRepository {
    players: Vec<PlayerRecord>,
    failure: Option<String>,
}

impl MemoryPlayerRepository {
    pub fn new(mut players: Vec<PlayerRecord>) -> Self {
        players.sort_by_key(|p| (p.indian_rank, p.id));
        Self {
            players,
            failure: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            players: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait::async_trait]
impl PlayerRepository for MemoryPlayerRepository {
    async fn find_players(&self, filter: &NameFilter) -> ServiceResult<Vec<PlayerRecord>> {
        if let Some(reason) = &self.failure {
            return ServiceError::internal(reason.clone());
        }
        Ok(self
            .players
            .iter()
            .filter(|p| filter.matches(&p.name))
            .cloned()
            .collect())
    }
}
