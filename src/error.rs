use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::db::StoreError;
use crate::models::{MessageResponse, MissingFields, validate::REQUIRED_FIELDS_MESSAGE};

pub const NOT_FOUND_MESSAGE: &str = "Player not found";

#[derive(Debug)]
pub enum ApiError {
    /// Required fields absent from a create/update body
    Validation(MissingFields),
    NotFound,
    /// The store call itself failed; carries the store's message
    Persistence(String),
    /// Body could not be decoded into a player request
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound => "not_found",
            ApiError::Persistence(_) => "persistence_failure",
            ApiError::MalformedBody(_) => "malformed_body",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(_) => REQUIRED_FIELDS_MESSAGE.to_string(),
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::Persistence(message) => message,
            ApiError::MalformedBody(message) => message,
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Persistence(err.to_string())
    }
}

impl From<MissingFields> for ApiError {
    fn from(missing: MissingFields) -> Self {
        ApiError::Validation(missing)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}
