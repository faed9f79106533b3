use chess_ratings_domain::{
    ServiceError, ServiceResult,
    player::{NameFilter, PlayerId, PlayerRecord, PlayerRepository},
};
use log::info;
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

const SELECT_PLAYERS: &str = "SELECT id, indian_rank, name, title, federation, rating, birth_year, scraped_at FROM chess_players";

const ORDER_BY_RANK: &str = " ORDER BY indian_rank ASC, id ASC";

pub struct SqlitePlayerRepository {
    pool: Pool<Sqlite>,
}

impl SqlitePlayerRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Checks that the store is reachable and the player table readable.
    pub async fn ping(&self) -> ServiceResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chess_players")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        info!("Player store holds {} records", count);
        Ok(count)
    }

    fn player_from_row(row: &SqliteRow) -> sqlx::Result<PlayerRecord> {
        Ok(PlayerRecord {
            id: PlayerId(row.try_get("id")?),
            indian_rank: row.try_get("indian_rank")?,
            name: row.try_get("name")?,
            title: row.try_get("title")?,
            federation: row.try_get("federation")?,
            rating: row.try_get("rating")?,
            birth_year: row.try_get("birth_year")?,
            scraped_at: row.try_get("scraped_at")?,
        })
    }
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with `\` as escape.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait::async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn find_players(&self, filter: &NameFilter) -> ServiceResult<Vec<PlayerRecord>> {
        let rows = match filter.needle() {
            // LIKE folds ASCII case only, so it can only narrow ASCII needles
            Some(needle) if needle.is_ascii() => {
                sqlx::query(&format!(
                    "{SELECT_PLAYERS} WHERE name LIKE ? ESCAPE '\\'{ORDER_BY_RANK}"
                ))
                .bind(like_pattern(needle))
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query(&format!("{SELECT_PLAYERS}{ORDER_BY_RANK}"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let players = rows
            .iter()
            .map(|row| {
                Self::player_from_row(row).map_err(|e| ServiceError::Internal(e.to_string()))
            })
            .collect::<ServiceResult<Vec<PlayerRecord>>>()?;
        Ok(players
            .into_iter()
            .filter(|p| filter.matches(&p.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::CHESS_PLAYERS_SCHEMA;

    use super::*;

    async fn memory_pool() -> Pool<Sqlite> {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn seeded_repository() -> SqlitePlayerRepository {
        let pool = memory_pool().await;
        sqlx::raw_sql(CHESS_PLAYERS_SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        let rows = [
            (1, 3, "Gukesh D", "GM", 2777, 2006),
            (2, 1, "Arjun Erigaisi", "GM", 2801, 2003),
            (3, 2, "Praggnanandhaa R", "GM", 2741, 2005),
            (4, 4, "Anand, Viswanathan", "GM", 2783, 1969),
            (5, 5, "Vaishali R", "GM", 2484, 2001),
            (6, 6, "Test_Player 100%", "", 1500, 2010),
            (7, 6, "Testplayer 1000", "CM", 1600, 2011),
        ];
        for (id, rank, name, title, rating, birth_year) in rows {
            sqlx::query(
                "INSERT INTO chess_players (id, indian_rank, name, title, federation, rating, birth_year, scraped_at) VALUES (?, ?, ?, ?, 'IND', ?, ?, '2025-01-01T00:00:00Z')",
            )
            .bind(id)
            .bind(rank)
            .bind(name)
            .bind(title)
            .bind(rating)
            .bind(birth_year)
            .execute(&pool)
            .await
            .unwrap();
        }
        SqlitePlayerRepository::new(pool)
    }

    fn names(players: &[PlayerRecord]) -> Vec<&str> {
        players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("anand"), "%anand%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[tokio::test]
    async fn test_find_all_players_sorted_by_rank() {
        let repo = seeded_repository().await;
        let players = repo.find_players(&NameFilter::All).await.unwrap();
        let ranks: Vec<i64> = players.iter().map(|p| p.indian_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 6]);
        assert_eq!(players[5].id, PlayerId(6));
        assert_eq!(players[6].id, PlayerId(7));

        let arjun = &players[0];
        assert_eq!(arjun.name, "Arjun Erigaisi");
        assert_eq!(arjun.title, "GM");
        assert_eq!(arjun.federation, "IND");
        assert_eq!(arjun.rating, 2801);
        assert_eq!(arjun.birth_year, 2003);
        assert_eq!(arjun.scraped_at.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_find_players_case_insensitive_substring() {
        let repo = seeded_repository().await;
        let filter = NameFilter::from_query(Some("ANAND"));
        let players = repo.find_players(&filter).await.unwrap();
        assert_eq!(
            names(&players),
            vec!["Praggnanandhaa R", "Anand, Viswanathan"]
        );
        assert!(players.iter().all(|p| filter.matches(&p.name)));
    }

    #[tokio::test]
    async fn test_find_players_treats_wildcards_literally() {
        let repo = seeded_repository().await;

        let players = repo
            .find_players(&NameFilter::from_query(Some("100%")))
            .await
            .unwrap();
        assert_eq!(names(&players), vec!["Test_Player 100%"]);

        let players = repo
            .find_players(&NameFilter::from_query(Some("t_p")))
            .await
            .unwrap();
        assert_eq!(names(&players), vec!["Test_Player 100%"]);

        let players = repo
            .find_players(&NameFilter::from_query(Some("%")))
            .await
            .unwrap();
        assert_eq!(names(&players), vec!["Test_Player 100%"]);
    }

    #[tokio::test]
    async fn test_find_players_folds_non_ascii_case() {
        let repo = seeded_repository().await;
        sqlx::query(
            "INSERT INTO chess_players (id, indian_rank, name, title, federation, rating, birth_year, scraped_at) VALUES (8, 0, 'Ñandu, Émile', 'FM', 'IND', 2300, 1999, '2025-01-01T00:00:00Z')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        for query in ["ñandu", "ÑANDU", "émile", "Ñandu, É"] {
            let filter = NameFilter::from_query(Some(query));
            let players = repo.find_players(&filter).await.unwrap();
            assert_eq!(names(&players), vec!["Ñandu, Émile"], "query {:?}", query);
        }

        let players = repo
            .find_players(&NameFilter::from_query(Some("ÉMILE")))
            .await
            .unwrap();
        assert_eq!(players.len(), 1);

        let players = repo
            .find_players(&NameFilter::from_query(Some("andu")))
            .await
            .unwrap();
        assert_eq!(names(&players), vec!["Ñandu, Émile"]);

        let players = repo
            .find_players(&NameFilter::from_query(Some("é")))
            .await
            .unwrap();
        assert_eq!(names(&players), vec!["Ñandu, Émile"]);
    }

    #[tokio::test]
    async fn test_find_players_no_match() {
        let repo = seeded_repository().await;
        let players = repo
            .find_players(&NameFilter::from_query(Some("Carlsen")))
            .await
            .unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_scraped_at_defaults_to_insert_time() {
        let pool = memory_pool().await;
        sqlx::raw_sql(CHESS_PLAYERS_SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO chess_players (indian_rank, name, title, federation, rating, birth_year) VALUES (1, 'Harika, Dronavalli', 'GM', 'IND', 2490, 1991)",
        )
        .execute(&pool)
        .await
        .unwrap();
        let before = chrono::Utc::now() - chrono::Duration::minutes(1);

        let repo = SqlitePlayerRepository::new(pool);
        let players = repo.find_players(&NameFilter::All).await.unwrap();
        assert_eq!(players.len(), 1);
        assert!(players[0].scraped_at >= before);
        assert_eq!(players[0].id, PlayerId(1));
    }

    #[tokio::test]
    async fn test_ping_counts_records() {
        let repo = seeded_repository().await;
        assert_eq!(repo.ping().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_missing_table_is_internal_error() {
        let repo = SqlitePlayerRepository::new(memory_pool().await);
        assert!(matches!(
            repo.find_players(&NameFilter::All).await,
            Err(ServiceError::Internal(_))
        ));
        assert!(repo.ping().await.is_err());
    }
}
