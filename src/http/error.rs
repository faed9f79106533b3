use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chess_ratings_domain::ServiceError;
use log::error;

const FETCH_PLAYERS_FAILED: &str = "Error fetching chess players";

/// Maps service failures onto the fixed public error body. The cause is only
/// logged.
pub struct ApiError(ServiceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self.0 {
            ServiceError::Internal(cause) => {
                error!("Error fetching players: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_PLAYERS_FAILED)
            }
        };
        let body = serde_json::json!({ "message": msg });
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        ApiError(value)
    }
}
