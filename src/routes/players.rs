use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};

use crate::error::ApiError;
use crate::handlers::PlayerHandlers;
use crate::models::{MessageResponse, Player, PlayerRequest};

/// JSON player body. A request without a JSON content type or with an
/// empty body reads as `{}`, which then fails validation like any other
/// body missing the required fields.
pub struct PlayerBody(pub PlayerRequest);

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

impl<S> FromRequest<S> for PlayerBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(PlayerBody(PlayerRequest::default()));
        }

        let Json(request) = Json::<PlayerRequest>::from_bytes(&bytes)?;
        Ok(PlayerBody(request))
    }
}

// POST /players - Create a player
pub async fn create_player(
    State(handlers): State<PlayerHandlers>,
    PlayerBody(request): PlayerBody,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = handlers.create(request).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

// GET /players - List all players
pub async fn get_players(
    State(handlers): State<PlayerHandlers>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = handlers.list().await?;

    Ok(Json(players))
}

// GET /players/{id} - Get player by ID, `null` when there is none
pub async fn get_player_by_id(
    State(handlers): State<PlayerHandlers>,
    Path(player_id): Path<String>,
) -> Result<Json<Option<Player>>, ApiError> {
    let player = handlers.get(&player_id).await?;

    Ok(Json(player))
}

// PUT /players/{id} - Replace the given fields of a player
pub async fn update_player(
    State(handlers): State<PlayerHandlers>,
    Path(player_id): Path<String>,
    PlayerBody(request): PlayerBody,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = handlers.update(&player_id, request).await?;

    Ok(Json(MessageResponse::new(message)))
}

// DELETE /players/{id} - Remove a player
pub async fn delete_player(
    State(handlers): State<PlayerHandlers>,
    Path(player_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = handlers.delete(&player_id).await?;

    Ok(Json(MessageResponse::new(message)))
}
