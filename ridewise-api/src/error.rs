use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ridewise_booking::ReserveError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// The token was valid but its session is gone (closed or swept)
    pub fn session_expired() -> Self {
        AppError::AuthenticationError("Session expired".to_string())
    }

    pub fn from_reserve(err: ReserveError) -> Self {
        match err {
            e @ ReserveError::NotAuthenticated => AppError::AuthenticationError(e.to_string()),
            ReserveError::Catalog(e) => AppError::ValidationError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
