use std::sync::Arc;

use chess_ratings_domain::player::PlayerRecord;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    #[error("Failed to deserialize response")]
    Serde(#[from] serde_json::Error),

    #[error("Server answered with status {0}")]
    NotOkResponse(StatusCode),
}

pub type ArcPlayerSource = Arc<dyn PlayerSource + Send + Sync + 'static>;

#[async_trait::async_trait]
pub trait PlayerSource {
    /// Fetches every player whose name contains `query`; an empty query
    /// fetches all players.
    async fn fetch_players(&self, query: &str) -> Result<Vec<PlayerRecord>, HttpError>;
}

#[derive(Clone)]
pub struct PlayersApiClient {
    http_url: String,
    http_client: reqwest::Client,
}

impl PlayersApiClient {
    pub fn new(http_url: impl Into<String>) -> Self {
        let http_url = http_url.into().trim_end_matches('/').to_string();
        Self {
            http_url,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn players_url(&self) -> String {
        format!("{}/api/players", self.http_url)
    }
}

#[async_trait::async_trait]
impl PlayerSource for PlayersApiClient {
    async fn fetch_players(&self, query: &str) -> Result<Vec<PlayerRecord>, HttpError> {
        let mut request = self.http_client.get(self.players_url());
        if !query.is_empty() {
            request = request.query(&[("query", query)]);
        }
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(HttpError::NotOkResponse(resp.status()));
        }
        let json = resp.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}
