use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use super::{PlayerStore, StoreError};
use crate::models::{NewPlayer, Player, PlayerChanges};

const CREATE_PLAYERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY NOT NULL,
        first_name TEXT NOT NULL,
        middle_name TEXT,
        last_name TEXT NOT NULL,
        date_of_birth DATETIME,
        squad_number INTEGER NOT NULL,
        position TEXT NOT NULL,
        abbr_position TEXT,
        team TEXT,
        league TEXT,
        starting_11 BOOLEAN,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL
    )"#;

/// Player store backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqlitePlayerStore {
    pool: SqlitePool,
}

impl SqlitePlayerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    /// In-memory database on a single long-lived connection, so every
    /// query sees the same data.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_PLAYERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PlayerStore for SqlitePlayerStore {
    async fn insert(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        let stored = sqlx::query_as::<_, Player>(
            r#"INSERT INTO players (
                   id, first_name, middle_name, last_name, date_of_birth, squad_number,
                   position, abbr_position, team, league, starting_11, created_at, updated_at
               )
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
        .bind(&id)
        .bind(&player.first_name)
        .bind(&player.middle_name)
        .bind(&player.last_name)
        .bind(player.date_of_birth)
        .bind(player.squad_number)
        .bind(&player.position)
        .bind(&player.abbr_position)
        .bind(&player.team)
        .bind(&player.league)
        .bind(player.starting_11)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Player>, StoreError> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players ORDER BY rowid"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, StoreError> {
        let player = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE id = ?"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn update_by_id(
        &self,
        id: &str,
        changes: PlayerChanges,
    ) -> Result<Option<Player>, StoreError> {
        let PlayerChanges {
            first_name,
            middle_name,
            last_name,
            date_of_birth,
            squad_number,
            position,
            abbr_position,
            team,
            league,
            starting_11,
        } = changes;

        // Optional columns bind (given, value): given with a NULL value clears
        let updated = sqlx::query_as::<_, Player>(
            r#"UPDATE players SET
                   first_name = ?,
                   last_name = ?,
                   squad_number = ?,
                   position = ?,
                   middle_name = CASE WHEN ? THEN ? ELSE middle_name END,
                   date_of_birth = CASE WHEN ? THEN ? ELSE date_of_birth END,
                   abbr_position = CASE WHEN ? THEN ? ELSE abbr_position END,
                   team = CASE WHEN ? THEN ? ELSE team END,
                   league = CASE WHEN ? THEN ? ELSE league END,
                   starting_11 = CASE WHEN ? THEN ? ELSE starting_11 END,
                   updated_at = ?
               WHERE id = ?
               RETURNING *"#
        )
        .bind(first_name)
        .bind(last_name)
        .bind(squad_number)
        .bind(position)
        .bind(middle_name.is_some())
        .bind(middle_name.flatten())
        .bind(date_of_birth.is_some())
        .bind(date_of_birth.flatten())
        .bind(abbr_position.is_some())
        .bind(abbr_position.flatten())
        .bind(team.is_some())
        .bind(team.flatten())
        .bind(league.is_some())
        .bind(league.flatten())
        .bind(starting_11.is_some())
        .bind(starting_11.flatten())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Player>, StoreError> {
        let deleted = sqlx::query_as::<_, Player>(
            r#"DELETE FROM players WHERE id = ? RETURNING *"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
