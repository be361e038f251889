use std::sync::Arc;
use std::time::Instant;

use crate::db::PlayerStore;
use crate::error::ApiError;
use crate::models::{Player, PlayerRequest};

pub const UPDATED_MESSAGE: &str = "Player successfully updated";
pub const DELETED_MESSAGE: &str = "Player successfully deleted";

/// Request handlers for the player resource.
///
/// Each operation validates its input, makes exactly one store call and
/// classifies the result. Nothing is shared between calls except the store.
#[derive(Clone)]
pub struct PlayerHandlers {
    store: Arc<dyn PlayerStore>,
}

impl PlayerHandlers {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: PlayerRequest) -> Result<Player, ApiError> {
        let started = Instant::now();

        let result = self.insert_validated(request).await;

        observe("create", result.as_ref().ok().map(|p| p.id.as_str()), started, &result);
        result
    }

    async fn insert_validated(&self, request: PlayerRequest) -> Result<Player, ApiError> {
        let player = request.into_new_player()?;
        Ok(self.store.insert(player).await?)
    }

    pub async fn list(&self) -> Result<Vec<Player>, ApiError> {
        let started = Instant::now();

        let result = self.store.list_all().await.map_err(ApiError::from);

        if let Ok(players) = &result {
            tracing::debug!(count = players.len(), "listed players");
        }
        observe("list", None, started, &result);
        result
    }

    /// A missing player is not an error here: the caller gets `Ok(None)`.
    pub async fn get(&self, id: &str) -> Result<Option<Player>, ApiError> {
        let started = Instant::now();

        let result = self.store.find_by_id(id).await.map_err(ApiError::from);

        if let Ok(None) = &result {
            tracing::debug!(player_id = id, "no player with this id");
        }
        observe("get", Some(id), started, &result);
        result
    }

    /// Requires the full set of required fields even when only some change.
    pub async fn update(&self, id: &str, request: PlayerRequest) -> Result<&'static str, ApiError> {
        let started = Instant::now();

        let result = self.update_validated(id, request).await;

        observe("update", Some(id), started, &result);
        result
    }

    async fn update_validated(&self, id: &str, request: PlayerRequest) -> Result<&'static str, ApiError> {
        let changes = request.into_changes()?;

        match self.store.update_by_id(id, changes).await? {
            Some(_) => Ok(UPDATED_MESSAGE),
            None => Err(ApiError::NotFound),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<&'static str, ApiError> {
        let started = Instant::now();

        let result = self
            .store
            .delete_by_id(id)
            .await
            .map_err(ApiError::from)
            .and_then(|deleted| deleted.map(|_| DELETED_MESSAGE).ok_or(ApiError::NotFound));

        observe("delete", Some(id), started, &result);
        result
    }
}

/// One structured event per handled request: operation, outcome, latency.
fn observe<T>(
    operation: &str,
    player_id: Option<&str>,
    started: Instant,
    result: &Result<T, ApiError>,
) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let player_id = player_id.unwrap_or("-");

    match result {
        Ok(_) => tracing::info!(
            operation,
            player_id,
            outcome = "success",
            elapsed_ms,
            "player request handled"
        ),
        Err(ApiError::Persistence(message)) => tracing::error!(
            operation,
            player_id,
            outcome = "persistence_failure",
            elapsed_ms,
            error = %message,
            "player request failed"
        ),
        Err(ApiError::Validation(missing)) => tracing::warn!(
            operation,
            player_id,
            outcome = "validation_error",
            elapsed_ms,
            missing = ?missing.0,
            "player request rejected"
        ),
        Err(other) => tracing::warn!(
            operation,
            player_id,
            outcome = other.kind(),
            elapsed_ms,
            "player request rejected"
        ),
    }
}
