use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewPlayer, Player, PlayerChanges};

mod sqlite;

pub use sqlite::SqlitePlayerStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// CRUD contract the request handlers depend on.
///
/// Every call touches a single record and is atomic on its own. `None`
/// from the by-id operations means the record does not exist, which is
/// distinct from a store failure.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Persist a new player; the store assigns id, createdAt and updatedAt.
    async fn insert(&self, player: NewPlayer) -> Result<Player, StoreError>;

    async fn list_all(&self) -> Result<Vec<Player>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, StoreError>;

    /// Write the fields present in `changes` and refresh updatedAt.
    async fn update_by_id(
        &self,
        id: &str,
        changes: PlayerChanges,
    ) -> Result<Option<Player>, StoreError>;

    /// Remove a player, returning the removed record.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Player>, StoreError>;
}
