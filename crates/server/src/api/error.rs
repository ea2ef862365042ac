//! Mapping of draft errors onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use draftroom_core::{DraftError, ErrorKind};

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

/// Error returned by API handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, kind: &str, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                kind: kind.to_string(),
            },
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorKind::NotFound.as_str(), error)
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", error)
    }
}

/// HTTP status for an error category.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidState | ErrorKind::EmptyPool => StatusCode::CONFLICT,
        ErrorKind::RuleViolation => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        let kind = err.kind();
        warn!("Draft request rejected: {}", err);
        Self::new(status_for(kind), kind.as_str(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftroom_core::{DraftStatus, Position};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DraftError::NoDraft, StatusCode::CONFLICT),
            (
                DraftError::NotActive {
                    status: DraftStatus::Completed,
                },
                StatusCode::CONFLICT,
            ),
            (
                DraftError::TeamNotFound("t".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                DraftError::PlayerNotFound("p".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                DraftError::AlreadyDrafted("p".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DraftError::PositionFull {
                    team_id: "t".to_string(),
                    position: Position::Pitcher,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (DraftError::EmptyPool, StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_error_body() {
        let err = ApiError::from(DraftError::AlreadyDrafted("player-3".to_string()));
        assert_eq!(err.body.kind, "rule_violation");
        assert_eq!(err.body.error, "player already drafted: player-3");
    }
}
